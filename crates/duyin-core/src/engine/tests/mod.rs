mod pinyin;
mod scenarios;

use std::sync::Arc;

use super::LabelEngine;
use crate::testutil::test_dict;

fn test_engine() -> LabelEngine {
    LabelEngine::new(Arc::new(test_dict()))
}
