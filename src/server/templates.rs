//! HTML templates for the portal.
//!
//! Pages are assembled with string formatting; the stylesheet and the two
//! client scripts are served as consts from `/static/`. Every interpolated
//! user- or database-supplied string goes through [`html_escape`] first.

use chrono::NaiveDate;

use super::handlers::SearchParams;
use crate::locale::Locale;
use crate::models::{ContentItem, ContentType, LibraryStats};

/// Base HTML document with header navigation and the starfield backdrop.
pub fn base_template(locale: Locale, title: &str, content: &str, scripts: &str) -> String {
    let dict = locale.dict();
    let lang = locale.as_tag();

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - {site}</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <div id="starfield" aria-hidden="true"></div>
    <header id="main-header">
        <nav>
            <a href="/?lang={lang}" class="logo">{site}</a>
            <a href="/?lang={lang}">{home}</a>
            <a href="/search?lang={lang}">{search}</a>
            <span class="lang-switch">
                <a href="?lang=en">EN</a>
                <a href="?lang=zh-TW">繁</a>
                <a href="?lang=zh-CN">简</a>
            </span>
        </nav>
    </header>
    <main>
        <h1>{title}</h1>
        {content}
    </main>
    {scripts}
</body>
</html>"#,
        lang = lang,
        site = dict.site_title,
        title = title,
        home = dict.nav_home,
        search = dict.nav_search,
        content = content,
        scripts = scripts,
    )
}

/// Render the dashboard: stat tiles plus the most recent items.
pub fn dashboard_page(locale: Locale, stats: &LibraryStats, recent: &[ContentItem]) -> String {
    let dict = locale.dict();
    let lang = locale.as_tag();

    let mut rows = String::new();
    for item in recent {
        rows.push_str(&format!(
            r#"
        <li>
            <span class="badge badge-{ty}">{badge}</span>
            <a href="{href}">{title}</a>
            <span class="item-date">{date}</span>
        </li>
        "#,
            ty = item.content_type.as_str(),
            badge = badge_label(locale, item.content_type),
            href = detail_href(item.content_type, &item.id, locale),
            title = html_escape(&item.title),
            date = format_date(item.published_at),
        ));
    }

    let recent_section = if rows.is_empty() {
        String::new()
    } else {
        format!(
            r#"
    <h2>{heading}</h2>
    <ul class="recent-list">
        {rows}
    </ul>
    "#,
            heading = dict.recent_heading,
            rows = rows
        )
    };

    let content = format!(
        r#"
    <div class="stat-grid">
        <div class="stat-tile"><span class="stat-value">{papers}</span><span class="stat-label">{papers_label}</span></div>
        <div class="stat-tile"><span class="stat-value">{videos}</span><span class="stat-label">{videos_label}</span></div>
        <div class="stat-tile"><span class="stat-value">{nasa}</span><span class="stat-label">{nasa_label}</span></div>
        <div class="stat-tile stat-total"><span class="stat-value">{total}</span><span class="stat-label">{total_label}</span></div>
    </div>
    <p class="dashboard-cta"><a href="/search?lang={lang}" class="btn-primary">{search_label}</a></p>
    {recent_section}
    "#,
        papers = stats.papers,
        papers_label = dict.stat_papers,
        videos = stats.videos,
        videos_label = dict.stat_videos,
        nasa = stats.nasa,
        nasa_label = dict.stat_nasa,
        total = stats.total,
        total_label = dict.stat_total,
        lang = lang,
        search_label = dict.nav_search,
        recent_section = recent_section,
    );

    base_template(locale, dict.site_title, &content, "")
}

/// Render the search page shell. The embedded config hands the initial
/// query and the locale strings to the client scripts, which own the
/// result rendering from there.
pub fn search_page(locale: Locale, params: &SearchParams) -> String {
    let dict = locale.dict();
    let q = params.q.as_deref().unwrap_or("");
    let type_param = params.content_type.as_deref().unwrap_or("all");
    let sort = params.sort.as_deref().unwrap_or("date");
    let date_from = params.date_from.as_deref().unwrap_or("");
    let date_to = params.date_to.as_deref().unwrap_or("");
    let page = params.page.unwrap_or(1).max(1);

    // Content-type tabs, mirrored into the hidden select by search.js
    let mut tabs = String::new();
    let mut options = String::new();
    for (value, label) in [
        ("all", dict.type_all),
        ("papers", dict.type_papers),
        ("videos", dict.type_videos),
        ("nasa", dict.type_nasa),
    ] {
        let checked = if value == type_param { "checked" } else { "" };
        let selected = if value == type_param { " selected" } else { "" };
        tabs.push_str(&format!(
            r#"<label class="type-tab"><input type="radio" name="type-tab" value="{value}" {checked}><span>{label}</span></label>"#,
            value = value,
            checked = checked,
            label = label,
        ));
        options.push_str(&format!(
            r#"<option value="{value}"{selected}>{label}</option>"#,
            value = value,
            selected = selected,
            label = label,
        ));
    }

    let sort_date_selected = if sort == "title" { "" } else { " selected" };
    let sort_title_selected = if sort == "title" { " selected" } else { "" };

    let config = serde_json::json!({
        "lang": locale.as_tag(),
        "apiBase": "/api/search",
        "i18n": dict,
        "query": {
            "q": q,
            "type": type_param,
            "sort": sort,
            "dateFrom": date_from,
            "dateTo": date_to,
            "page": page,
        },
    })
    .to_string()
    // Keep </script> and friends inert inside the inline JSON
    .replace('<', "\\u003c");

    let content = format!(
        r#"
    <form id="search-form" autocomplete="off">
        <div class="search-row">
            <input type="text" id="q" name="q" value="{q}" placeholder="{placeholder}">
            <button type="submit" class="btn-primary">{button}</button>
        </div>
        <div class="type-tabs">{tabs}</div>
        <select id="type-select" hidden>{options}</select>
        <div class="filter-row">
            <label class="filter-field">{sort_label}
                <select id="sort">
                    <option value="date"{sort_date_selected}>{sort_date}</option>
                    <option value="title"{sort_title_selected}>{sort_title}</option>
                </select>
            </label>
            <label class="filter-field">{from_label}
                <input type="text" id="dateFrom" value="{date_from}" placeholder="YYYY-MM-DD" readonly>
                <button type="button" class="cal-open" data-target="dateFrom">&#128197;</button>
            </label>
            <label class="filter-field">{to_label}
                <input type="text" id="dateTo" value="{date_to}" placeholder="YYYY-MM-DD" readonly>
                <button type="button" class="cal-open" data-target="dateTo">&#128197;</button>
            </label>
        </div>
        <div id="search-error" class="search-message error" hidden></div>
    </form>

    <div id="results"><p class="search-hint">{hint}</p></div>

    <div id="astro-calendar" class="cal-overlay" hidden>
        <div class="cal-panel">
            <div class="cal-header">
                <button type="button" class="cal-prev">{cal_prev}</button>
                <span class="cal-title"></span>
                <button type="button" class="cal-next">{cal_next}</button>
            </div>
            <div class="cal-weekdays"></div>
            <div class="cal-grid"></div>
            <button type="button" class="cal-close">{cal_close}</button>
        </div>
    </div>

    <script>window.ASTRO = {config};</script>
    "#,
        q = html_escape(q),
        placeholder = html_escape(dict.search_placeholder),
        button = dict.search_button,
        tabs = tabs,
        options = options,
        sort_label = dict.sort_label,
        sort_date = dict.sort_date,
        sort_title = dict.sort_title,
        sort_date_selected = sort_date_selected,
        sort_title_selected = sort_title_selected,
        from_label = dict.date_from,
        to_label = dict.date_to,
        date_from = html_escape(date_from),
        date_to = html_escape(date_to),
        hint = dict.search_hint,
        cal_prev = dict.cal_prev,
        cal_next = dict.cal_next,
        cal_close = dict.cal_close,
        config = config,
    );

    let scripts =
        r#"<script src="/static/calendar.js"></script><script src="/static/search.js"></script>"#;

    base_template(locale, dict.search_heading, &content, scripts)
}

/// Render an item's detail page.
pub fn detail_page(locale: Locale, item: &ContentItem) -> String {
    let dict = locale.dict();

    let byline = item
        .byline
        .as_deref()
        .map(|b| format!(r#"<p class="detail-byline">{}</p>"#, html_escape(b)))
        .unwrap_or_default();

    let published = item
        .published_at
        .map(|d| {
            format!(
                r#"<p><strong>{}:</strong> {}</p>"#,
                dict.detail_published,
                d.format("%Y-%m-%d")
            )
        })
        .unwrap_or_default();

    let content = format!(
        r#"
    <div class="detail-card">
        <span class="badge badge-{ty}">{badge}</span>
        {byline}
        {published}
        <p><strong>{source_label}:</strong> <a href="{url}" rel="noopener" target="_blank">{url_text}</a></p>
        <div class="detail-summary">{summary}</div>
    </div>
    <p><a href="/search?lang={lang}">&larr; {back}</a></p>
    "#,
        ty = item.content_type.as_str(),
        badge = badge_label(locale, item.content_type),
        byline = byline,
        published = published,
        source_label = dict.detail_source,
        url = html_escape(&item.url),
        url_text = html_escape(&item.url),
        summary = html_escape(&item.summary),
        lang = locale.as_tag(),
        back = dict.detail_back,
    );

    base_template(locale, &html_escape(&item.title), &content, "")
}

/// Render the 404 page.
pub fn not_found_page(locale: Locale) -> String {
    let dict = locale.dict();
    let content = format!(
        r#"
    <div class="not-found">
        <p class="not-found-message">{message}</p>
        <p><a href="/?lang={lang}">{home}</a></p>
    </div>
    "#,
        message = dict.not_found_message,
        lang = locale.as_tag(),
        home = dict.nav_home,
    );
    base_template(locale, dict.not_found_heading, &content, "")
}

/// Detail link for an item, matching the contract the renderer uses.
pub fn detail_href(content_type: ContentType, id: &str, locale: Locale) -> String {
    format!(
        "/detail?type={}&id={}&lang={}",
        content_type.as_str(),
        urlencoding::encode(id),
        locale.as_tag()
    )
}

fn badge_label(locale: Locale, content_type: ContentType) -> &'static str {
    let dict = locale.dict();
    match content_type {
        ContentType::Paper => dict.badge_paper,
        ContentType::Video => dict.badge_video,
        ContentType::Nasa => dict.badge_nasa,
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// CSS for the portal - dark sky theme with a subtle animated starfield.
pub const CSS: &str = r#"
:root {
    --bg: #0b0e1a;
    --panel: #151a2e;
    --text: #e6e9f5;
    --text-muted: #8b92ad;
    --link: #7fb4ff;
    --link-hover: #aacdff;
    --border: #2a3150;
    --accent: #ffb347;
    --paper: #7fb4ff;
    --video: #ff7f9f;
    --nasa: #7fe0b0;
    --danger: #ff6b6b;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: 'Segoe UI', 'Helvetica Neue', Arial, sans-serif;
    font-size: 15px;
    background: var(--bg);
    color: var(--text);
    line-height: 1.6;
    min-height: 100vh;
}

a { color: var(--link); text-decoration: none; }
a:hover { color: var(--link-hover); text-decoration: underline; }

/* Decorative starfield */
#starfield {
    position: fixed;
    inset: 0;
    pointer-events: none;
    background-image:
        radial-gradient(1px 1px at 20% 30%, #fff 50%, transparent 51%),
        radial-gradient(1px 1px at 70% 10%, #fff 50%, transparent 51%),
        radial-gradient(2px 2px at 40% 80%, #cdd6ff 50%, transparent 51%),
        radial-gradient(1px 1px at 90% 60%, #fff 50%, transparent 51%),
        radial-gradient(1px 1px at 10% 70%, #cdd6ff 50%, transparent 51%),
        radial-gradient(2px 2px at 60% 40%, #fff 50%, transparent 51%);
    opacity: 0.5;
    animation: twinkle 6s ease-in-out infinite alternate;
    z-index: 0;
}

@keyframes twinkle {
    from { opacity: 0.25; }
    to { opacity: 0.6; }
}

#main-header {
    position: relative;
    z-index: 1;
    border-bottom: 1px solid var(--border);
    padding: 0.6rem 1rem;
    background: rgba(11, 14, 26, 0.9);
}

#main-header nav {
    display: flex;
    gap: 1.5rem;
    align-items: center;
    max-width: 960px;
    margin: 0 auto;
}

#main-header .logo {
    font-weight: bold;
    letter-spacing: 2px;
    color: var(--accent);
}

.lang-switch { margin-left: auto; display: flex; gap: 0.5rem; font-size: 12px; }

main {
    position: relative;
    z-index: 1;
    max-width: 960px;
    margin: 0 auto;
    padding: 1.5rem 1rem 3rem;
}

h1 {
    font-size: 22px;
    margin-bottom: 1.2rem;
    border-bottom: 1px solid var(--border);
    padding-bottom: 0.6rem;
}

h2 { font-size: 16px; margin: 1.5rem 0 0.75rem; }

/* Dashboard */
.stat-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
    gap: 0.75rem;
}

.stat-tile {
    background: var(--panel);
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 1rem;
    display: flex;
    flex-direction: column;
    align-items: center;
}

.stat-tile .stat-value { font-size: 28px; font-weight: bold; }
.stat-tile .stat-label { font-size: 12px; color: var(--text-muted); text-transform: uppercase; letter-spacing: 1px; }
.stat-total .stat-value { color: var(--accent); }

.dashboard-cta { margin: 1.25rem 0; }

.recent-list { list-style: none; }
.recent-list li {
    padding: 0.5rem 0;
    border-bottom: 1px solid var(--border);
    display: flex;
    gap: 0.6rem;
    align-items: baseline;
}
.recent-list .item-date { margin-left: auto; color: var(--text-muted); font-size: 12px; }

/* Search form */
#search-form {
    background: var(--panel);
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 1rem;
    margin-bottom: 1.25rem;
}

.search-row { display: flex; gap: 0.5rem; }

#q {
    flex: 1;
    padding: 0.5rem 0.75rem;
    font-size: 15px;
    background: var(--bg);
    color: var(--text);
    border: 1px solid var(--border);
    border-radius: 4px;
}
#q:focus { outline: none; border-color: var(--link); }

.btn-primary {
    padding: 0.5rem 1.25rem;
    background: var(--link);
    color: #0b0e1a;
    border: none;
    border-radius: 4px;
    font-size: 14px;
    font-weight: bold;
    cursor: pointer;
}
.btn-primary:hover { background: var(--link-hover); text-decoration: none; }

.type-tabs { display: flex; gap: 0.4rem; margin-top: 0.75rem; flex-wrap: wrap; }

.type-tab { cursor: pointer; }
.type-tab input { position: absolute; opacity: 0; }
.type-tab span {
    display: inline-block;
    padding: 0.25rem 0.9rem;
    border: 1px solid var(--border);
    border-radius: 999px;
    font-size: 13px;
    color: var(--text-muted);
}
.type-tab input:checked + span {
    border-color: var(--link);
    color: var(--text);
    background: rgba(127, 180, 255, 0.12);
}

.filter-row { display: flex; gap: 1.25rem; margin-top: 0.75rem; flex-wrap: wrap; align-items: center; }

.filter-field { font-size: 13px; color: var(--text-muted); display: flex; gap: 0.4rem; align-items: center; }
.filter-field select, .filter-field input {
    padding: 0.3rem 0.5rem;
    background: var(--bg);
    color: var(--text);
    border: 1px solid var(--border);
    border-radius: 4px;
    font-size: 13px;
}
.filter-field input { width: 110px; }
.cal-open { background: none; border: none; cursor: pointer; font-size: 15px; }

/* Results */
.search-hint, .search-message { color: var(--text-muted); padding: 1rem 0; }
.search-message.error { color: var(--danger); }

.result-count { color: var(--text-muted); font-size: 13px; margin-bottom: 0.5rem; }

.related-notice {
    background: rgba(255, 179, 71, 0.12);
    border: 1px solid var(--accent);
    color: var(--accent);
    border-radius: 4px;
    padding: 0.5rem 0.75rem;
    font-size: 13px;
    margin-bottom: 0.75rem;
}

.result-card {
    background: var(--panel);
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 0.9rem 1rem;
    margin-bottom: 0.75rem;
}

.card-head { display: flex; gap: 0.5rem; align-items: center; margin-bottom: 0.3rem; }

.badge {
    display: inline-block;
    padding: 1px 8px;
    border-radius: 999px;
    font-size: 11px;
    text-transform: uppercase;
    letter-spacing: 0.5px;
    border: 1px solid var(--border);
}
.badge-paper { color: var(--paper); border-color: var(--paper); }
.badge-video { color: var(--video); border-color: var(--video); }
.badge-nasa { color: var(--nasa); border-color: var(--nasa); }
.badge-related { color: var(--accent); border-color: var(--accent); }

.card-title { font-size: 16px; font-weight: bold; }
.card-date { color: var(--text-muted); font-size: 12px; margin-left: 0.5rem; }
.card-snippet { color: var(--text-muted); font-size: 13px; margin-top: 0.3rem; }
.card-more { display: inline-block; margin-top: 0.4rem; font-size: 13px; }

/* Skeleton placeholders */
.skeleton { pointer-events: none; }
.skeleton-line {
    height: 12px;
    border-radius: 4px;
    margin: 0.5rem 0;
    background: linear-gradient(90deg, var(--border) 25%, #39415f 50%, var(--border) 75%);
    background-size: 200% 100%;
    animation: shimmer 1.2s linear infinite;
}
.skeleton-line.w60 { width: 60%; }
.skeleton-line.w80 { width: 80%; }

@keyframes shimmer {
    from { background-position: 200% 0; }
    to { background-position: -200% 0; }
}

/* Pager */
.pager {
    display: flex;
    gap: 1rem;
    align-items: center;
    justify-content: center;
    margin: 1.25rem 0;
}

.pager button {
    padding: 0.35rem 1rem;
    background: var(--panel);
    color: var(--link);
    border: 1px solid var(--border);
    border-radius: 4px;
    font-size: 13px;
    cursor: pointer;
}
.pager button:disabled { color: var(--text-muted); cursor: default; opacity: 0.5; }
.pager button:not(:disabled):hover { border-color: var(--link); }
.pager-label { color: var(--text-muted); font-size: 13px; }

/* Calendar modal */
.cal-overlay {
    position: fixed;
    inset: 0;
    background: rgba(0, 0, 0, 0.6);
    display: flex;
    align-items: center;
    justify-content: center;
    z-index: 10;
}
.cal-overlay[hidden] { display: none; }

.cal-panel {
    background: var(--panel);
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 1rem;
    width: 280px;
}

.cal-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 0.5rem; }
.cal-header button {
    background: none;
    border: 1px solid var(--border);
    border-radius: 4px;
    color: var(--link);
    cursor: pointer;
    padding: 0.15rem 0.6rem;
}
.cal-title { font-weight: bold; }

.cal-weekdays, .cal-grid { display: grid; grid-template-columns: repeat(7, 1fr); gap: 2px; }
.cal-weekdays span { text-align: center; font-size: 11px; color: var(--text-muted); padding: 0.2rem 0; }

.cal-day {
    background: none;
    border: none;
    color: var(--text);
    font-size: 13px;
    padding: 0.35rem 0;
    border-radius: 4px;
    cursor: pointer;
}
.cal-day:hover { background: rgba(127, 180, 255, 0.15); }
.cal-day.dim { color: var(--text-muted); opacity: 0.5; }

.cal-close {
    margin-top: 0.6rem;
    width: 100%;
    background: none;
    border: 1px solid var(--border);
    border-radius: 4px;
    color: var(--text-muted);
    padding: 0.3rem;
    cursor: pointer;
}

/* Detail page */
.detail-card {
    background: var(--panel);
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 1.25rem;
    margin-bottom: 1rem;
}
.detail-byline { color: var(--text-muted); font-size: 13px; margin: 0.5rem 0; }
.detail-summary { margin-top: 0.75rem; white-space: pre-wrap; }

/* 404 */
.not-found { text-align: center; padding: 3rem 0; }
.not-found-message { font-size: 18px; color: var(--text-muted); margin-bottom: 1rem; }

@media (max-width: 600px) {
    .search-row { flex-direction: column; }
    .filter-row { flex-direction: column; align-items: flex-start; }
}
"#;

/// Client-side search results renderer.
///
/// Owns one search session per page view: Idle (hint) -> Loading (three
/// skeleton cards) -> Loaded | Empty | Errored, with a Previous/Next pager
/// re-entering Loading. Responses are stamped with a sequence number and
/// stale completions are dropped.
pub const SEARCH_JS: &str = r#"
(function() {
    const cfg = window.ASTRO || {};
    const i18n = cfg.i18n || {};
    const initial = cfg.query || {};

    const form = document.getElementById('search-form');
    const resultsEl = document.getElementById('results');
    const input = document.getElementById('q');
    const errorEl = document.getElementById('search-error');
    const typeSelect = document.getElementById('type-select');
    const sortSelect = document.getElementById('sort');
    const fromInput = document.getElementById('dateFrom');
    const toInput = document.getElementById('dateTo');
    if (!form || !resultsEl || !input) return;

    let lastSeq = 0;

    // The non-negotiable escaping contract: < and > never reach markup raw.
    function escapeHtml(s) {
        return String(s)
            .replace(/&/g, '&amp;')
            .replace(/</g, '&lt;')
            .replace(/>/g, '&gt;');
    }

    function fmt(template, vars) {
        return String(template || '').replace(/\{(\w+)\}/g, function(m, k) {
            return vars[k] !== undefined ? vars[k] : m;
        });
    }

    // Tabs drive the hidden select; the select is what requests read.
    form.querySelectorAll('input[name="type-tab"]').forEach(function(radio) {
        radio.addEventListener('change', function() {
            if (radio.checked && typeSelect) typeSelect.value = radio.value;
        });
    });

    function currentQuery(page) {
        return {
            q: input.value.trim(),
            type: typeSelect ? typeSelect.value : 'all',
            sort: sortSelect ? sortSelect.value : 'date',
            dateFrom: fromInput ? fromInput.value.trim() : '',
            dateTo: toInput ? toInput.value.trim() : '',
            page: page || 1
        };
    }

    function hasInvalidChars(text) {
        for (const ch of text) {
            if (ch === '<' || ch === '>' || ch.charCodeAt(0) < 32) return true;
        }
        return false;
    }

    function renderSkeleton() {
        resultsEl.innerHTML = '';
        for (let i = 0; i < 3; i++) {
            const card = document.createElement('div');
            card.className = 'result-card skeleton';
            card.innerHTML =
                '<div class="skeleton-line w60"></div>' +
                '<div class="skeleton-line"></div>' +
                '<div class="skeleton-line w80"></div>';
            resultsEl.appendChild(card);
        }
    }

    function badgeLabel(type) {
        if (type === 'paper') return i18n.badge_paper;
        if (type === 'video') return i18n.badge_video;
        return i18n.badge_nasa;
    }

    function buildCard(item) {
        const card = document.createElement('div');
        card.className = 'result-card';

        const head = document.createElement('div');
        head.className = 'card-head';

        const badge = document.createElement('span');
        badge.className = 'badge badge-' + item.type;
        badge.textContent = badgeLabel(item.type);
        head.appendChild(badge);

        if (item.lowRelevance) {
            const related = document.createElement('span');
            related.className = 'badge badge-related';
            related.textContent = i18n.related_badge;
            head.appendChild(related);
        }

        const title = document.createElement('a');
        title.className = 'card-title';
        title.href = item.url;
        title.rel = 'noopener';
        title.target = '_blank';
        title.innerHTML = escapeHtml(item.title);
        head.appendChild(title);

        if (item.publishedDate) {
            const date = document.createElement('span');
            date.className = 'card-date';
            date.textContent = item.publishedDate;
            head.appendChild(date);
        }

        card.appendChild(head);

        if (item.snippet) {
            let text = item.snippet;
            if (text.length > 200) text = text.slice(0, 200) + '...';
            const snippet = document.createElement('p');
            snippet.className = 'card-snippet';
            snippet.textContent = text;
            card.appendChild(snippet);
        }

        const more = document.createElement('a');
        more.className = 'card-more';
        more.href = '/detail?type=' + encodeURIComponent(item.type) +
            '&id=' + encodeURIComponent(item.id) +
            '&lang=' + encodeURIComponent(cfg.lang || 'en');
        more.textContent = i18n.more_link;
        card.appendChild(more);

        return card;
    }

    // Replace the address-bar state; no new history entry.
    function updateAddressBar(query) {
        const params = new URLSearchParams();
        params.set('q', query.q);
        params.set('type', query.type);
        params.set('lang', cfg.lang || 'en');
        if (query.dateFrom) params.set('dateFrom', query.dateFrom);
        if (query.dateTo) params.set('dateTo', query.dateTo);
        params.set('page', query.page);
        history.replaceState(null, '', '/search?' + params.toString());
    }

    function renderError(message) {
        resultsEl.innerHTML = '';
        const div = document.createElement('div');
        div.className = 'search-message error';
        div.innerHTML = escapeHtml(i18n.search_failed) + escapeHtml(message);
        resultsEl.appendChild(div);
    }

    function renderResults(data) {
        resultsEl.innerHTML = '';

        if (!data.total) {
            const div = document.createElement('div');
            div.className = 'search-message';
            div.textContent = i18n.no_results;
            resultsEl.appendChild(div);
            return;
        }

        const count = document.createElement('p');
        count.className = 'result-count';
        count.textContent = fmt(i18n.found_results, { n: data.total });
        resultsEl.appendChild(count);

        if (data.showingRelated) {
            const note = document.createElement('div');
            note.className = 'related-notice';
            note.textContent = i18n.showing_related;
            resultsEl.appendChild(note);
        }

        // Papers first, then videos, then NASA; arrival order within a group
        const groups = [data.papers || [], data.videos || [], data.nasa || []];
        for (const group of groups) {
            for (const item of group) {
                resultsEl.appendChild(buildCard(item));
            }
        }

        const p = data.pagination;
        if (p && p.totalPages > 1) {
            const nav = document.createElement('div');
            nav.className = 'pager';

            const prev = document.createElement('button');
            prev.type = 'button';
            prev.textContent = i18n.page_prev;
            prev.disabled = !p.hasPrev;
            prev.addEventListener('click', function() { doSearch(p.page - 1, true); });

            const label = document.createElement('span');
            label.className = 'pager-label';
            label.textContent = fmt(i18n.page_of, { x: p.page, y: p.totalPages });

            const next = document.createElement('button');
            next.type = 'button';
            next.textContent = i18n.page_next;
            next.disabled = !p.hasNext;
            next.addEventListener('click', function() { doSearch(p.page + 1, true); });

            nav.appendChild(prev);
            nav.appendChild(label);
            nav.appendChild(next);
            resultsEl.appendChild(nav);
        }
    }

    function doSearch(page, scrollTop) {
        const query = currentQuery(page);
        if (!query.q) return;

        const seq = ++lastSeq;
        renderSkeleton();

        const params = new URLSearchParams();
        params.set('q', query.q);
        params.set('type', query.type);
        params.set('page', query.page);
        params.set('limit', '20');
        params.set('lang', cfg.lang || 'en');
        params.set('sort', query.sort);
        if (query.dateFrom) params.set('dateFrom', query.dateFrom);
        if (query.dateTo) params.set('dateTo', query.dateTo);

        fetch((cfg.apiBase || '/api/search') + '?' + params.toString())
            .then(function(resp) { return resp.json(); })
            .then(function(data) {
                if (seq !== lastSeq) return;   // stale response, drop it
                updateAddressBar(query);
                if (data.error) {
                    renderError(data.error);
                    return;
                }
                renderResults(data);
                if (scrollTop) window.scrollTo({ top: 0, behavior: 'smooth' });
            })
            .catch(function(err) {
                if (seq !== lastSeq) return;
                updateAddressBar(query);
                renderError(err && err.message ? err.message : String(err));
            });
    }

    form.addEventListener('submit', function(e) {
        e.preventDefault();
        errorEl.hidden = true;
        const text = input.value.trim();
        if (!text) return;
        if (hasInvalidChars(text)) {
            errorEl.textContent = i18n.invalid_query;
            errorEl.hidden = false;
            return;
        }
        doSearch(1, false);
    });

    // Initial mount: enter Loading only when a query arrived in the URL
    if (initial.q && String(initial.q).trim()) {
        doSearch(initial.page || 1, false);
    }
})();
"#;

/// Month-grid date picker.
///
/// One widget instance shared by every date input, parameterized by the
/// target input's id; state resets on each open. Exposed as
/// `window.AstroCalendar` with `open(targetId)` / `close()` /
/// `onDateSelected(callback)`.
pub const CALENDAR_JS: &str = r#"
(function() {
    const cfg = window.ASTRO || {};
    const i18n = cfg.i18n || {};
    const modal = document.getElementById('astro-calendar');
    if (!modal) return;

    const titleEl = modal.querySelector('.cal-title');
    const gridEl = modal.querySelector('.cal-grid');
    const weekdaysEl = modal.querySelector('.cal-weekdays');

    let targetId = null;
    let view = { year: 0, month: 0 };   // month is 0-11
    let onSelect = null;

    function pad(n) { return n < 10 ? '0' + n : String(n); }

    function daysInMonth(year, month) {
        // Day 0 of the next month; Date normalizes month overflow
        return new Date(year, month + 1, 0).getDate();
    }

    function render() {
        const first = new Date(view.year, view.month, 1);
        const offset = first.getDay();
        const dim = daysInMonth(view.year, view.month);
        const prevDim = daysInMonth(view.year, view.month - 1);

        titleEl.textContent = view.year + '-' + pad(view.month + 1);
        gridEl.innerHTML = '';

        // Always 42 cells: 6 rows of 7, padded with adjacent-month days
        for (let cell = 0; cell < 42; cell++) {
            const el = document.createElement('button');
            el.type = 'button';
            el.className = 'cal-day';

            let day;
            let month = view.month;
            if (cell < offset) {
                day = prevDim - offset + 1 + cell;
                month -= 1;
                el.classList.add('dim');
            } else if (cell >= offset + dim) {
                day = cell - offset - dim + 1;
                month += 1;
                el.classList.add('dim');
            } else {
                day = cell - offset + 1;
            }

            const date = new Date(view.year, month, day);
            el.textContent = String(day);
            el.dataset.date = date.getFullYear() + '-' +
                pad(date.getMonth() + 1) + '-' + pad(date.getDate());
            el.addEventListener('click', function() { select(el.dataset.date); });
            gridEl.appendChild(el);
        }
    }

    function select(iso) {
        const target = targetId ? document.getElementById(targetId) : null;
        if (target) {
            target.value = iso;
            target.dispatchEvent(new Event('change', { bubbles: true }));
        }
        if (onSelect) onSelect(iso, targetId);
        close();
    }

    function open(id) {
        targetId = id;
        const target = document.getElementById(id);
        const seed = target && /^\d{4}-\d{2}-\d{2}$/.test(target.value)
            ? new Date(target.value + 'T00:00:00')
            : new Date();
        view = { year: seed.getFullYear(), month: seed.getMonth() };

        weekdaysEl.innerHTML = '';
        (i18n.cal_weekdays || 'Su,Mo,Tu,We,Th,Fr,Sa').split(',').forEach(function(w) {
            const span = document.createElement('span');
            span.textContent = w;
            weekdaysEl.appendChild(span);
        });

        render();
        modal.hidden = false;
    }

    function close() {
        modal.hidden = true;
        targetId = null;
    }

    function shiftMonth(delta) {
        let month = view.month + delta;
        if (month < 0) { month = 11; view.year -= 1; }
        else if (month > 11) { month = 0; view.year += 1; }
        view.month = month;
        render();
    }

    modal.querySelector('.cal-prev').addEventListener('click', function() { shiftMonth(-1); });
    modal.querySelector('.cal-next').addEventListener('click', function() { shiftMonth(1); });
    modal.querySelector('.cal-close').addEventListener('click', close);
    modal.addEventListener('click', function(e) { if (e.target === modal) close(); });

    document.querySelectorAll('.cal-open').forEach(function(btn) {
        btn.addEventListener('click', function() { open(btn.dataset.target); });
    });

    window.AstroCalendar = { open: open, close: close, onDateSelected: function(cb) { onSelect = cb; } };
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_item() -> ContentItem {
        ContentItem {
            id: "p1".to_string(),
            content_type: ContentType::Paper,
            title: "On <script>alert(1)</script> Black Holes".to_string(),
            summary: "A summary with <tags> & ampersands".to_string(),
            url: "https://arxiv.org/abs/2401.00001".to_string(),
            byline: Some("A. Astronomer".to_string()),
            category: Some("astro-ph".to_string()),
            published_at: NaiveDate::from_ymd_opt(2024, 1, 1),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn html_escape_encodes_angle_brackets() {
        assert_eq!(
            html_escape(r#"<script>"x" & y</script>"#),
            "&lt;script&gt;&quot;x&quot; &amp; y&lt;/script&gt;"
        );
    }

    #[test]
    fn detail_page_escapes_item_fields() {
        let page = detail_page(Locale::En, &sample_item());
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(page.contains("&lt;tags&gt; &amp; ampersands"));
    }

    #[test]
    fn detail_href_matches_contract() {
        assert_eq!(
            detail_href(ContentType::Nasa, "PIA03606", Locale::ZhTw),
            "/detail?type=nasa&id=PIA03606&lang=zh-TW"
        );
    }

    #[test]
    fn search_page_prefills_and_escapes_query() {
        let params = SearchParams {
            q: Some("<b>quasars".to_string()),
            content_type: Some("papers".to_string()),
            ..Default::default()
        };
        let page = search_page(Locale::En, &params);
        assert!(page.contains(r#"value="&lt;b&gt;quasars""#));
        // Inline config JSON keeps < inert
        assert!(page.contains("\\u003cb>quasars"));
        assert!(!page.contains("<b>quasars"));
        // The papers tab is preselected
        assert!(page.contains(r#"value="papers" checked"#));
    }

    #[test]
    fn dashboard_shows_counts() {
        let stats = LibraryStats::new(12, 3, 7);
        let page = dashboard_page(Locale::En, &stats, &[sample_item()]);
        assert!(page.contains(">22<"));
        assert!(page.contains(">12<"));
        assert!(page.contains("badge-paper"));
    }

    #[test]
    fn not_found_localized() {
        let en = not_found_page(Locale::En);
        let zh = not_found_page(Locale::ZhCn);
        assert!(en.contains("404"));
        assert!(en.contains("drifted out of orbit"));
        assert!(zh.contains("飘出轨道"));
    }

    #[test]
    fn renderer_script_keeps_contracts() {
        // Fixed 3-card skeleton, sequence guard, replaceState address bar
        assert!(SEARCH_JS.contains("for (let i = 0; i < 3; i++)"));
        assert!(SEARCH_JS.contains("seq !== lastSeq"));
        assert!(SEARCH_JS.contains("history.replaceState"));
        assert!(SEARCH_JS.contains(".replace(/</g, '&lt;')"));
    }

    #[test]
    fn calendar_script_renders_42_cells() {
        assert!(CALENDAR_JS.contains("cell < 42"));
        assert!(CALENDAR_JS.contains("AstroCalendar"));
    }
}
