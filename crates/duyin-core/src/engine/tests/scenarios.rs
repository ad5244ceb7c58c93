use std::io::Write;

use super::test_engine;
use crate::assign::Tier;
use crate::engine::LabelEngine;
use crate::error::LabelError;
use crate::settings::Settings;
use crate::strategy::Strategy;
use crate::testutil::syl;
use crate::validate::CollisionKey;

#[test]
fn union_labels_mixed_list() {
    let run = test_engine()
        .run(&["银", "河", "银行", "银河"], Strategy::Union)
        .unwrap();
    assert_eq!(run.labels(), vec!["银", "河", "行", "银河"]);
    assert!(run.validation.passed());
    assert_eq!(run.validation.checked, 4);
    assert_eq!(run.collection.members, 6);
    assert_eq!(run.classes.single, 2);
    assert_eq!(run.classes.compound, 2);
}

#[test]
fn context_vote_rejects_out_of_scope_tokens() {
    let err = test_engine()
        .run(&["银行", "长城", "iPhone"], Strategy::ContextVote)
        .unwrap_err();
    assert!(matches!(err, LabelError::InvalidInput { ref token, .. } if token == "iPhone"));
}

#[test]
fn context_vote_rejects_colliding_singles() {
    let err = test_engine()
        .run(&["行", "银行", "行"], Strategy::ContextVote)
        .unwrap_err();
    match err {
        LabelError::FatalCollision {
            reading,
            first_index,
            second_index,
            ..
        } => {
            assert_eq!(reading, syl("hang2"));
            assert_eq!((first_index, second_index), (0, 2));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn first_char_skips_excluded_words_in_validation() {
    let run = test_engine()
        .run(&["银", "银行", "A", "A"], Strategy::FirstChar)
        .unwrap();
    assert!(run.validation.passed());
    assert_eq!(run.validation.checked, 1);
    assert_eq!(run.validation.skipped, 3);
}

#[test]
fn duplicate_compounds_are_reported_not_fatal() {
    let run = test_engine()
        .run(&["银行", "长城", "银行"], Strategy::FirstChar)
        .unwrap();
    assert!(!run.validation.passed());
    let group = &run.validation.collisions[0];
    assert_eq!(group.key.to_string(), "yin2hang2");
    assert_eq!(
        group.words,
        vec![(0, "银行".to_string()), (2, "银行".to_string())]
    );
}

#[test]
fn duplicate_foreign_words_collide_literally() {
    let run = test_engine()
        .run(&["ABC", "银行", "ABC"], Strategy::Union)
        .unwrap();
    assert_eq!(run.validation.collisions.len(), 1);
    assert_eq!(
        run.validation.collisions[0].key,
        CollisionKey::Literal("ABC".to_string())
    );
}

#[test]
fn empty_input_passes() {
    let tokens: [&str; 0] = [];
    for strategy in Strategy::ALL {
        let run = test_engine().run(&tokens, strategy).unwrap();
        assert!(run.assignments.is_empty());
        assert!(run.validation.passed());
    }
}

#[test]
fn unknown_character_aborts_run() {
    let err = test_engine().run(&["银龘"], Strategy::Union).unwrap_err();
    assert!(matches!(err, LabelError::DictionaryLookup { .. }));
}

#[test]
fn run_pair_diffs_strategies() {
    let pair = test_engine()
        .run_pair(&["银", "河", "银行", "银河"], Strategy::FirstChar, Strategy::Union)
        .unwrap();
    assert_eq!(pair.left.labels(), vec!["银", "河", "银行", "银河"]);
    assert_eq!(pair.comparison.same, 3);
    assert_eq!(pair.comparison.different, 1);
    let d = &pair.comparison.differences[0];
    assert_eq!(d.word, "银行");
    assert_eq!(d.left_tier, Tier::FullWord);
    assert_eq!(d.right_label, "行");
}

#[test]
fn run_lists_resolved_polyphones() {
    let run = test_engine()
        .run(&["银行", "行走", "长城"], Strategy::Union)
        .unwrap();
    let chars: Vec<char> = run.polyphones.iter().map(|r| r.ch).collect();
    assert_eq!(chars, vec!['行', '长']);
    assert_eq!(run.polyphones[0].chosen, syl("xing2"));
}

#[test]
fn stats_follow_assignments() {
    let run = test_engine()
        .run(&["银", "河", "银行", "银河"], Strategy::Union)
        .unwrap();
    let stats = &run.stats;
    assert_eq!(stats.total, 4);
    assert_eq!(stats.tier_count(Tier::Identity), 2);
    assert_eq!(stats.tier_count(Tier::SecondChar), 1);
    assert_eq!(stats.tier_count(Tier::FullWord), 1);
    assert_eq!(stats.escalated, 2);
}

#[test]
fn lookup_and_explain() {
    let engine = test_engine();
    assert_eq!(engine.lookup('行').unwrap(), vec![syl("hang2"), syl("xing2")]);
    assert!(matches!(
        engine.lookup('A'),
        Err(LabelError::InvalidInput { .. })
    ));

    let r = engine.explain(&["行走", "行列", "行业"], '行').unwrap();
    assert_eq!(r.votes, vec![1, 2]);
    assert_eq!(r.chosen, syl("xing2"));
}

#[test]
fn settings_layer_override_table() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[chars]\n\"行\" = [\"xing2\"]").unwrap();

    let mut settings = Settings::default().dictionary;
    settings.overrides = Some(file.path().to_path_buf());
    let engine = LabelEngine::from_settings(&settings).unwrap();
    assert_eq!(engine.lookup('行').unwrap()[0], syl("xing2"));
}

#[test]
fn settings_missing_override_file_fails() {
    let mut settings = Settings::default().dictionary;
    settings.overrides = Some("/nonexistent/duyin-overrides.toml".into());
    assert!(LabelEngine::from_settings(&settings).is_err());
}
