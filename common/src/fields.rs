//! 入力フィールドの復号
//!
//! 除籍リストのエクスポートは引用符の扱いが緩く、文字コードもUTF-8とは限らない。
//!
//! - UTF-8として不正なフィールドは Windows-1252 (Latin-1 上位互換) として読む
//! - `"` で始まるフィールドは引用符付き。閉じ引用符までのタブはフィールドの一部
//! - 閉じ引用符は、タブまたは行末の直前にある奇数個の `"` の最後の1つ
//! - 囲みの引用符を外し、`""` を `"` に戻す。途中の単独の `"` はそのまま残す
//! - 行末までに閉じない場合、先頭の `"` は単なる文字として扱う

use encoding_rs::WINDOWS_1252;

/// 1フィールド分のバイト列を文字列にする
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned(),
    }
}

/// タブ区切りで分割済みの1行を、引用符を解釈したフィールド列にする
pub fn decode_row<'a, I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let parts: Vec<String> = raw.into_iter().map(decode_text).collect();

    let mut fields = Vec::with_capacity(parts.len());
    let mut i = 0;
    while i < parts.len() {
        match join_quoted(&parts[i..]) {
            Some((value, used)) => {
                fields.push(value);
                i += used;
            }
            None => {
                fields.push(parts[i].clone());
                i += 1;
            }
        }
    }
    fields
}

/// 先頭要素が引用符付きフィールドなら (復号値, 使った要素数)
fn join_quoted(parts: &[String]) -> Option<(String, usize)> {
    let mut body = parts.first()?.strip_prefix('"')?.to_string();
    let mut used = 1;

    while !closes_quote(&body) {
        let next = parts.get(used)?;
        body.push('\t');
        body.push_str(next);
        used += 1;
    }

    body.pop();
    Some((body.replace("\"\"", "\""), used))
}

/// 末尾の `"` が奇数個なら最後の1つが閉じ引用符
fn closes_quote(body: &str) -> bool {
    body.bytes().rev().take_while(|&b| b == b'"').count() % 2 == 1
}
