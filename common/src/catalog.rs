//! 検索対象カタログの定義
//!
//! カタログはコンパイル時に決まる静的な設定。
//! 追加する場合は `CATALOGS` に定義を足すだけでよい。

/// ISBN埋め込み位置
const ISBN_PLACEHOLDER: &str = "{isbn}";
/// 書名埋め込み位置
const TITLE_PLACEHOLDER: &str = "{title}";
/// 接続先埋め込み位置
const TARGET_PLACEHOLDER: &str = "{target}";

/// カタログ定義
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    /// 表示名（ログ用）
    pub name: &'static str,
    /// Z39.50接続先 (host:port/database)
    pub target: &'static str,
    /// 外部クライアントに渡すスクリプト
    pub query_template: &'static str,
    /// ヒット時の直接検索URL
    pub hit_url_template: &'static str,
    /// 未ヒット時の書名検索URL
    pub title_url_template: &'static str,
    /// 出力列名: 所蔵有無
    pub found_column: &'static str,
    /// 出力列名: 検索URL
    pub url_column: &'static str,
}

impl Catalog {
    /// ISBNを埋め込んだクエリスクリプト
    pub fn query_script(&self, isbn: &str) -> String {
        self.query_template
            .replace(TARGET_PLACEHOLDER, self.target)
            .replace(ISBN_PLACEHOLDER, isbn)
    }

    /// ヒットしたISBNで直接検索URLを作る
    pub fn hit_url(&self, isbn: &str) -> String {
        self.hit_url_template.replace(ISBN_PLACEHOLDER, isbn)
    }

    /// エスケープ済み書名で検索URLを作る
    pub fn title_url(&self, escaped_title: &str) -> String {
        self.title_url_template.replace(TITLE_PLACEHOLDER, escaped_title)
    }
}

/// オタワ大学 (Innovative Millennium)
pub const UOTTAWA: Catalog = Catalog {
    name: "uOttawa",
    target: "orbis.uottawa.ca:210/INNOPAC",
    query_template: "open {target}\nfind @attr 1=7 \"{isbn}\"\nclose\nquit\n",
    hit_url_template: "https://orbis.uottawa.ca/search/?searchtype=i&SORT=D&searcharg={isbn}",
    title_url_template: "https://orbis.uottawa.ca/search/?searchtype=t&SORT=D&searcharg={title}",
    found_column: "FOUND IN UOFO CATALOGUE",
    url_column: "UOFO CATALOGUE SEARCH",
};

/// トロント大学 (SirsiDynix)
pub const UTORONTO: Catalog = Catalog {
    name: "UofT",
    target: "sirsi.library.utoronto.ca:2200",
    query_template: "open {target}\nfind @attr 1=7 \"{isbn}\"\nquit\n",
    hit_url_template: "https://onesearch.library.utoronto.ca/onesearch/{isbn}//",
    title_url_template: "https://onesearch.library.utoronto.ca/onesearch/{title}//title",
    found_column: "FOUND IN UOFT CATALOGUE",
    url_column: "UOFT CATALOGUE SEARCH",
};

/// 照会順。出力列もこの順で並ぶ
pub const CATALOGS: &[Catalog] = &[UOTTAWA, UTORONTO];
