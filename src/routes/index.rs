use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};

use crate::page::Page;
use crate::toggle::{link_id, SectionToggle};

/// Collapsible sections on the index page, with their link labels.
pub const SECTIONS: [(&str, &str); 2] =
    [("about", "About"), ("faq", "Questions")];

#[derive(serde::Deserialize)]
pub struct IndexQuery {
    open: Option<String>,
}

/// Every section starts hidden; `open` names the one to show.
pub fn section_toggle(open: Option<&str>) -> SectionToggle {
    let mut toggles = SectionToggle::hidden(SECTIONS.map(|(id, _)| id));
    if let Some(id) = open.filter(|id| SECTIONS.iter().any(|(s, _)| s == id)) {
        toggles.toggle(id);
    }
    toggles
}

#[tracing::instrument(name = "render index page", skip(query))]
pub async fn index(query: web::Query<IndexQuery>) -> HttpResponse {
    let mut page = Page::new();
    section_toggle(query.open.as_deref()).apply_all(&mut page);

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render_index(&page))
}

pub fn render_index(page: &Page) -> String {
    let mut sections_html = String::new();
    for (id, label) in SECTIONS {
        let link = link_id(id);
        let shown = page.element(id).map_or(false, |e| !e.is_hidden());
        // the link of an open section closes it again
        let href = if shown {
            "/".to_string()
        } else {
            format!("/?open={}", id)
        };
        sections_html.push_str(&format!(
            r#"    <p><a id="{link}" href="{href}" style="{link_style}">{label}</a></p>
    <div id="{id}" style="{block_style}">{body}</div>
"#,
            link_style = page.style_attribute(&link),
            block_style = page.style_attribute(id),
            body = section_body(id),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8">
    <title>Mountain Project Visualizer</title>
</head>
<body>
    <p>Enter the email address of your Mountain Project account.</p>
    <form name="visualize" action="/data" method="post">
        <input
            type="text"
            id="email"
            name="email"
            placeholder="Email"
            value="{email}"
        >
        <select name="units">
            <option value="feet">Feet</option>
            <option value="meters">Meters</option>
        </select>
        <button type="submit" id="vbutton" style="{vbutton_style}">Visualize</button>
        <div id="status" style="{status_style}">{status}</div>
    </form>
    <form name="test" action="/data" method="post">
        <input type="hidden" name="test" value="yes">
        <button type="submit" id="lbutton" style="{lbutton_style}">Try the test account</button>
        <div id="loadingframe" style="{loadingframe_style}">{loadingframe}</div>
    </form>
{sections_html}</body>
</html>
"#,
        email = htmlescape::encode_minimal(page.value("email")),
        vbutton_style = page.style_attribute("vbutton"),
        status_style = page.style_attribute("status"),
        status = page.inner_html("status"),
        lbutton_style = page.style_attribute("lbutton"),
        loadingframe_style = page.style_attribute("loadingframe"),
        loadingframe = page.inner_html("loadingframe"),
    )
}

fn section_body(id: &str) -> &'static str {
    match id {
        "about" => {
            "Mountain Project Visualizer downloads your tick list and \
            shows how much you climbed each year."
        }
        _ => {
            "Your ticks are only held in memory while the page is built. \
            Heights for ticks without a length are estimated from the \
            route type."
        }
    }
}
