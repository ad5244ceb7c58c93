#![cfg(test)]

use crate::dict::{parse_table_toml, TableDictionary};
use crate::reading::Syllable;

/// Shared test dictionary.
///
/// 行 deliberately lists `hang2` as its default so that context votes for
/// `xing2` are observable.
pub fn test_dict() -> TableDictionary {
    parse_table_toml(
        r#"
[chars]
"银" = ["yin2"]
"河" = ["he2"]
"行" = ["hang2", "xing2"]
"走" = ["zou3"]
"列" = ["lie4"]
"业" = ["ye4"]
"长" = ["zhang3", "chang2"]
"城" = ["cheng2"]
"大" = ["da4", "dai4"]
"江" = ["jiang1"]
"音" = ["yin1"]
"乐" = ["le4", "yue4"]
"重" = ["zhong4", "chong2"]
"庆" = ["qing4"]
"要" = ["yao4", "yao1"]
"天" = ["tian1"]
"气" = ["qi4"]
"火" = ["huo3"]
"车" = ["che1", "ju1"]
"人" = ["ren2"]
"学" = ["xue2"]
"生" = ["sheng1"]
"马" = ["ma3"]
"吗" = ["ma0", "ma2"]

[phrases]
"银行" = ["yin2", "hang2"]
"行走" = ["xing2", "zou3"]
"行列" = ["xing2", "lie4"]
"行业" = ["hang2", "ye4"]
"长城" = ["chang2", "cheng2"]
"长江" = ["chang2", "jiang1"]
"长大" = ["zhang3", "da4"]
"音乐" = ["yin1", "yue4"]
"重庆" = ["chong2", "qing4"]
"重要" = ["zhong4", "yao4"]
"火车" = ["huo3", "che1"]
"#,
    )
    .expect("test dictionary must parse")
}

pub fn syl(s: &str) -> Syllable {
    s.parse().expect("test syllable must parse")
}
