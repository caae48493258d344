use crate::client::composer::ComposerView;
use crate::client::feed::FeedView;
use crate::client::page::{HeaderView, PageView};
use crate::client::post_row::PostRowView;

const TITLE: &str = "Chirp";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_composer(view: &ComposerView) -> String {
    let mut html = format!(
        r#"<div class="composer"><img src="{}" alt="Profile image" width="56" height="56"/>"#,
        escape(&view.avatar_url)
    );
    html.push_str(&format!(
        r#"<input type="text" name="content" placeholder="{}" value="{}"{}/>"#,
        escape(view.placeholder),
        escape(&view.draft),
        if view.input_disabled { " disabled" } else { "" }
    ));
    if view.show_submit {
        html.push_str(r#"<button type="submit">Post</button>"#);
    }
    if view.show_spinner {
        html.push_str(r#"<div class="spinner" role="status"></div>"#);
    }
    html.push_str("</div>");
    html
}

fn render_row(row: &PostRowView) -> String {
    format!(
        concat!(
            r#"<article class="post" data-key="{key}">"#,
            r#"<img src="{avatar}" alt="{alt}" width="56" height="56"/>"#,
            r#"<div><div class="meta"><a href="{profile}"><span>{handle}</span></a>"#,
            r#"<a href="{permalink}"><span class="time">{time}</span></a></div>"#,
            r#"<span class="content">{content}</span></div></article>"#
        ),
        key = row.key,
        avatar = escape(&row.avatar_url),
        alt = escape(&row.avatar_alt),
        profile = escape(&row.profile_href),
        handle = escape(&row.handle),
        permalink = escape(&row.permalink_href),
        time = escape(&row.timestamp_label),
        content = escape(&row.content),
    )
}

fn render_feed(feed: &FeedView) -> String {
    match feed {
        FeedView::Loading => r#"<div class="loading" role="status"></div>"#.to_string(),
        FeedView::Error(text) => format!("<div>{}</div>", escape(text)),
        FeedView::Rows(rows) => {
            let body: String = rows.iter().map(render_row).collect();
            format!(r#"<div class="feed">{}</div>"#, body)
        }
    }
}

/// Full HTML document for the home page.
pub fn render_page(view: &PageView) -> String {
    let body = match view {
        PageView::Empty => "<div></div>".to_string(),
        PageView::Ready { header, feed } => {
            let header_html = match header {
                HeaderView::SignIn => r#"<a class="sign-in" href="/sign-in">Sign in</a>"#.to_string(),
                HeaderView::Composer(composer) => render_composer(composer),
            };
            format!(
                r#"<main><div class="column"><header>{}</header>{}</div></main>"#,
                header_html,
                render_feed(feed)
            )
        }
    };

    format!(
        concat!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"/><title>{}</title>",
            "<link rel=\"icon\" href=\"/favicon.ico\"/></head><body>{}</body></html>"
        ),
        TITLE, body
    )
}
