//! Runs against the real `pinyin` data with the built-in phrase table.

use crate::engine::LabelEngine;
use crate::strategy::Strategy;

#[test]
fn union_with_pinyin_data() {
    let engine = LabelEngine::with_pinyin().unwrap();
    let run = engine
        .run(&["银行", "银河", "行走"], Strategy::Union)
        .unwrap();
    // 行 follows 行走 (xing2), so 银行 shares both of its syllables.
    assert_eq!(run.labels(), vec!["银行", "河", "走"]);
    assert!(run.validation.passed());
}

#[test]
fn every_strategy_runs_on_pinyin_data() {
    let engine = LabelEngine::with_pinyin().unwrap();
    let tokens = ["长城", "长江", "重庆", "银行", "音乐", "天", "马"];
    for strategy in Strategy::ALL {
        let a = engine.run(&tokens, strategy).unwrap();
        let b = engine.run(&tokens, strategy).unwrap();
        assert_eq!(a.assignments, b.assignments);
    }
}
