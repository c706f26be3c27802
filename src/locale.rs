//! Locale dictionaries for the portal UI.
//!
//! Three locales are supported: English, Traditional Chinese, and Simplified
//! Chinese. Every user-visible string rendered by the templates or by the
//! embedded client scripts comes from these dictionaries; the client receives
//! its subset as a JSON object embedded in the page.

use serde::Serialize;

/// Supported UI locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    ZhTw,
    ZhCn,
}

impl Locale {
    /// Parse a locale from a `lang` query parameter. Unknown tags fall back
    /// to English.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "zh-tw" | "zh-hant" => Locale::ZhTw,
            "zh-cn" | "zh-hans" | "zh" => Locale::ZhCn,
            _ => Locale::En,
        }
    }

    /// Canonical tag used in URLs and the `lang` attribute.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhTw => "zh-TW",
            Locale::ZhCn => "zh-CN",
        }
    }

    /// Dictionary for this locale.
    pub fn dict(&self) -> &'static Dict {
        match self {
            Locale::En => &EN,
            Locale::ZhTw => &ZH_TW,
            Locale::ZhCn => &ZH_CN,
        }
    }
}

/// UI strings for one locale.
///
/// Strings with `{n}`, `{x}`, `{y}` placeholders are filled in by the
/// client-side renderer.
#[derive(Debug, Serialize)]
pub struct Dict {
    pub site_title: &'static str,
    pub nav_home: &'static str,
    pub nav_search: &'static str,

    pub stat_papers: &'static str,
    pub stat_videos: &'static str,
    pub stat_nasa: &'static str,
    pub stat_total: &'static str,
    pub recent_heading: &'static str,

    pub search_heading: &'static str,
    pub search_placeholder: &'static str,
    pub search_button: &'static str,
    pub search_hint: &'static str,
    pub invalid_query: &'static str,
    pub type_all: &'static str,
    pub type_papers: &'static str,
    pub type_videos: &'static str,
    pub type_nasa: &'static str,
    pub date_from: &'static str,
    pub date_to: &'static str,
    pub sort_label: &'static str,
    pub sort_date: &'static str,
    pub sort_title: &'static str,

    pub found_results: &'static str,
    pub no_results: &'static str,
    pub showing_related: &'static str,
    pub search_failed: &'static str,
    pub loading: &'static str,
    pub more_link: &'static str,
    pub related_badge: &'static str,
    pub badge_paper: &'static str,
    pub badge_video: &'static str,
    pub badge_nasa: &'static str,
    pub page_prev: &'static str,
    pub page_next: &'static str,
    pub page_of: &'static str,

    pub detail_published: &'static str,
    pub detail_source: &'static str,
    pub detail_back: &'static str,

    pub cal_weekdays: &'static str,
    pub cal_prev: &'static str,
    pub cal_next: &'static str,
    pub cal_close: &'static str,

    pub not_found_heading: &'static str,
    pub not_found_message: &'static str,
}

pub static EN: Dict = Dict {
    site_title: "AstroGroot",
    nav_home: "Home",
    nav_search: "Search",

    stat_papers: "Papers",
    stat_videos: "Videos",
    stat_nasa: "NASA",
    stat_total: "Total items",
    recent_heading: "Recently added",

    search_heading: "Search the library",
    search_placeholder: "black holes, exoplanets, James Webb...",
    search_button: "Search",
    search_hint: "Enter a query to search papers, videos, and NASA media.",
    invalid_query: "The query contains characters that cannot be searched.",
    type_all: "All",
    type_papers: "Papers",
    type_videos: "Videos",
    type_nasa: "NASA",
    date_from: "From",
    date_to: "To",
    sort_label: "Sort",
    sort_date: "Newest first",
    sort_title: "Title",

    found_results: "Found {n} result(s)",
    no_results: "No results. Try different keywords or a wider date range.",
    showing_related: "No exact matches. Showing related content instead.",
    search_failed: "Search failed: ",
    loading: "Searching...",
    more_link: "More",
    related_badge: "related",
    badge_paper: "Paper",
    badge_video: "Video",
    badge_nasa: "NASA",
    page_prev: "Previous",
    page_next: "Next",
    page_of: "Page {x} of {y}",

    detail_published: "Published",
    detail_source: "Source",
    detail_back: "Back to search",

    cal_weekdays: "Su,Mo,Tu,We,Th,Fr,Sa",
    cal_prev: "<",
    cal_next: ">",
    cal_close: "Close",

    not_found_heading: "404",
    not_found_message: "This page drifted out of orbit.",
};

pub static ZH_TW: Dict = Dict {
    site_title: "AstroGroot",
    nav_home: "首頁",
    nav_search: "搜尋",

    stat_papers: "論文",
    stat_videos: "影片",
    stat_nasa: "NASA",
    stat_total: "全部項目",
    recent_heading: "最新收錄",

    search_heading: "搜尋資料庫",
    search_placeholder: "黑洞、系外行星、韋伯望遠鏡...",
    search_button: "搜尋",
    search_hint: "輸入關鍵字搜尋論文、影片與 NASA 內容。",
    invalid_query: "查詢含有無法搜尋的字元。",
    type_all: "全部",
    type_papers: "論文",
    type_videos: "影片",
    type_nasa: "NASA",
    date_from: "起始",
    date_to: "結束",
    sort_label: "排序",
    sort_date: "最新優先",
    sort_title: "標題",

    found_results: "找到 {n} 筆結果",
    no_results: "沒有結果。請嘗試其他關鍵字或放寬日期範圍。",
    showing_related: "沒有完全符合的結果，以下為相關內容。",
    search_failed: "搜尋失敗：",
    loading: "搜尋中...",
    more_link: "更多",
    related_badge: "相關",
    badge_paper: "論文",
    badge_video: "影片",
    badge_nasa: "NASA",
    page_prev: "上一頁",
    page_next: "下一頁",
    page_of: "第 {x} 頁，共 {y} 頁",

    detail_published: "發佈日期",
    detail_source: "來源",
    detail_back: "回到搜尋",

    cal_weekdays: "日,一,二,三,四,五,六",
    cal_prev: "<",
    cal_next: ">",
    cal_close: "關閉",

    not_found_heading: "404",
    not_found_message: "這個頁面已經飄出軌道。",
};

pub static ZH_CN: Dict = Dict {
    site_title: "AstroGroot",
    nav_home: "首页",
    nav_search: "搜索",

    stat_papers: "论文",
    stat_videos: "视频",
    stat_nasa: "NASA",
    stat_total: "全部条目",
    recent_heading: "最新收录",

    search_heading: "搜索资料库",
    search_placeholder: "黑洞、系外行星、韦伯望远镜...",
    search_button: "搜索",
    search_hint: "输入关键字搜索论文、视频与 NASA 内容。",
    invalid_query: "查询包含无法搜索的字符。",
    type_all: "全部",
    type_papers: "论文",
    type_videos: "视频",
    type_nasa: "NASA",
    date_from: "开始",
    date_to: "结束",
    sort_label: "排序",
    sort_date: "最新优先",
    sort_title: "标题",

    found_results: "找到 {n} 条结果",
    no_results: "没有结果。请尝试其他关键字或放宽日期范围。",
    showing_related: "没有完全匹配的结果，以下为相关内容。",
    search_failed: "搜索失败：",
    loading: "搜索中...",
    more_link: "更多",
    related_badge: "相关",
    badge_paper: "论文",
    badge_video: "视频",
    badge_nasa: "NASA",
    page_prev: "上一页",
    page_next: "下一页",
    page_of: "第 {x} 页，共 {y} 页",

    detail_published: "发布日期",
    detail_source: "来源",
    detail_back: "返回搜索",

    cal_weekdays: "日,一,二,三,四,五,六",
    cal_prev: "<",
    cal_next: ">",
    cal_close: "关闭",

    not_found_heading: "404",
    not_found_message: "这个页面已经飘出轨道。",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_locale_tags() {
        assert_eq!(Locale::from_tag("en"), Locale::En);
        assert_eq!(Locale::from_tag("zh-TW"), Locale::ZhTw);
        assert_eq!(Locale::from_tag("zh-tw"), Locale::ZhTw);
        assert_eq!(Locale::from_tag("zh-CN"), Locale::ZhCn);
        assert_eq!(Locale::from_tag("zh"), Locale::ZhCn);
        assert_eq!(Locale::from_tag("fr"), Locale::En);
        assert_eq!(Locale::from_tag(""), Locale::En);
    }

    #[test]
    fn tags_round_trip() {
        for locale in [Locale::En, Locale::ZhTw, Locale::ZhCn] {
            assert_eq!(Locale::from_tag(locale.as_tag()), locale);
        }
    }

    #[test]
    fn placeholders_present_in_every_locale() {
        for locale in [Locale::En, Locale::ZhTw, Locale::ZhCn] {
            let dict = locale.dict();
            assert!(dict.found_results.contains("{n}"));
            assert!(dict.page_of.contains("{x}"));
            assert!(dict.page_of.contains("{y}"));
            assert_eq!(dict.cal_weekdays.split(',').count(), 7);
        }
    }
}
