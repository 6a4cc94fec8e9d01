//! ISBN抽出
//!
//! 020|a サブフィールドの値から検索用ISBN候補を取り出す。
//! 繰り返しサブフィールドは `";"` で連結されている。
//!
//! チェックディジットや桁数の検証は行わない。空でないトークンはすべて候補とする。

/// 繰り返しサブフィールドの区切り
const SUBFIELD_DELIMITER: &str = "\";\"";

/// 候補の前後から除去する文字
fn is_trim_char(c: char) -> bool {
    matches!(c, ':' | '.' | '"')
}

/// サブフィールド値からISBN候補を順序どおりに抽出
///
/// - 各要素の最初の空白より前のみ採用（"(pbk.)" などの修飾は捨てる）
/// - 末尾のコロン・ピリオド、囲みの引用符を除去
/// - 空文字は除外、重複は除外しない
///
/// # Examples
/// ```
/// use gardener_common::extract_isbns;
///
/// let isbns = extract_isbns("\"0-13-110362-8 (pbk.)\";\"9780131103627\"");
/// assert_eq!(isbns, vec!["0-13-110362-8", "9780131103627"]);
/// ```
pub fn extract_isbns(raw: &str) -> Vec<String> {
    raw.trim()
        .split(SUBFIELD_DELIMITER)
        .filter_map(|part| {
            let token = part.split(' ').next().unwrap_or_default();
            let isbn = token.trim_matches(is_trim_char);
            (!isbn.is_empty()).then(|| isbn.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_isbn_is_unchanged() {
        assert_eq!(extract_isbns("0131103628"), vec!["0131103628"]);
        assert_eq!(extract_isbns(" 0131103628 "), vec!["0131103628"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_isbns("").is_empty());
        assert!(extract_isbns("   ").is_empty());
        assert!(extract_isbns("\"\";\"\"").is_empty());
    }

    #[test]
    fn test_qualifier_discarded_and_order_kept() {
        let isbns = extract_isbns("\"0-13-110362-8 (pbk.)\";\"9780131103627\"");
        assert_eq!(isbns, vec!["0-13-110362-8", "9780131103627"]);
    }

    #[test]
    fn test_trailing_punctuation_stripped() {
        assert_eq!(extract_isbns("0131103628 :"), vec!["0131103628"]);
        assert_eq!(extract_isbns("0131103628:"), vec!["0131103628"]);
        assert_eq!(extract_isbns("0131103628."), vec!["0131103628"]);
    }

    #[test]
    fn test_duplicates_preserved() {
        let isbns = extract_isbns("\"0131103628\";\"0131103628 (v. 1)\"");
        assert_eq!(isbns, vec!["0131103628", "0131103628"]);
    }

    #[test]
    fn test_lenient_tokens_accepted() {
        // 形式チェックはしない
        assert_eq!(extract_isbns("abc (invalid)"), vec!["abc"]);
    }

    #[test]
    fn test_leading_space_in_part_yields_nothing_for_that_part() {
        // 要素先頭が空白だと最初のトークンは空
        let isbns = extract_isbns("\"9780131103627\";\" (pbk.)\"");
        assert_eq!(isbns, vec!["9780131103627"]);
    }
}
