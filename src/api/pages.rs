//! Minimal server-rendered pages for the browser client.

use actix_web::HttpResponse;

use crate::models::{Question, Tier};

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"zh-Hant\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

pub fn html(page: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page)
}

pub fn render_home() -> String {
    layout(
        "單字轉蛋",
        "<h1>單字轉蛋</h1>\n<nav>\n\
         <a href=\"/earn?file=junior\">國中單字</a>\n\
         <a href=\"/earn?file=senior\">高中單字</a>\n\
         <a href=\"/gachapon\">轉蛋</a>\n</nav>",
    )
}

pub fn render_earn(question: &Question, selected: Tier) -> String {
    let tier_link = |tier: Tier, label: &str| {
        let marker = if tier == selected { " aria-current=\"page\"" } else { "" };
        format!("<a href=\"/earn?file={}\"{}>{}</a>", tier.as_str(), marker, label)
    };

    let options = [
        &question.option1,
        &question.option2,
        &question.option3,
        &question.option4,
    ]
    .iter()
    .enumerate()
    .map(|(i, option)| {
        format!(
            "<li><button type=\"button\" data-option=\"{}\">{}</button></li>",
            i + 1,
            escape_html(option)
        )
    })
    .collect::<Vec<_>>()
    .join("\n");

    let body = format!(
        "<nav>{} {}</nav>\n\
         <section id=\"quiz\" data-file=\"{}\" data-correct=\"{}\">\n\
         <h2 id=\"question\">{}</h2>\n<ol id=\"options\">\n{}\n</ol>\n</section>",
        tier_link(Tier::Junior, "國中"),
        tier_link(Tier::Senior, "高中"),
        selected.as_str(),
        question.correct_answer,
        escape_html(&question.question),
        options
    );

    layout("賺罐罐", &body)
}

pub fn render_gachapon() -> String {
    layout(
        "轉蛋",
        "<h1>轉蛋</h1>\n<section id=\"gacha\" data-endpoint=\"/draw_gacha\">\n\
         <button type=\"button\" id=\"draw\">抽一次</button>\n\
         <figure id=\"result\"></figure>\n</section>",
    )
}

pub async fn home() -> HttpResponse {
    log::info!("🏠 GET /");
    html(render_home())
}
