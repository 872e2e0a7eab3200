use zenn_reader::extract;

fn body(markup: &str) -> String {
    format!(r#"<html><body>{markup}<div class="znc"><p>Body</p></div></body></html>"#)
}

#[test]
fn author_from_user_name_element() {
    let html = body(r#"<a class="user-name"> Alice Liddell </a>"#);
    match extract(&html, "https://zenn.dev/alice/articles/x") {
        Ok(article) => assert_eq!(article.author, "Alice Liddell"),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn author_from_sticky_nav_display_name() {
    let html = body(r#"<span class="ContentStickyNavForMobile_displayName__cmEag">Bob</span>"#);
    let article = extract(&html, "https://zenn.dev/alice/articles/x").expect("extracts");
    assert_eq!(article.author, "Bob");
}

#[test]
fn author_falls_back_to_url_handle() {
    let article = extract(&body(""), "https://zenn.dev/carol/articles/abc123").expect("extracts");
    assert_eq!(article.author, "carol");
}

#[test]
fn author_empty_without_any_source() {
    let article = extract(&body(""), "").expect("extracts");
    assert!(article.author.is_empty());

    let article = extract(&body(""), "https://zenn.dev/").expect("extracts");
    assert!(article.author.is_empty());
}

#[test]
fn date_from_published_time_meta() {
    let html = r#"<html><head><meta property="article:published_time" content="2023-12-31T20:00:00Z"></head>
        <body><div class="znc"><p>Body</p></div></body></html>"#;
    match extract(html, "") {
        Ok(article) => assert_eq!(article.published.as_str(), "2023-12-31"),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn date_from_header_element() {
    let html = body(r#"<span class="ArticleHeader_pubDate__gF_sc">2024/03/15に公開</span>"#);
    let article = extract(&html, "").expect("extracts");
    assert_eq!(article.published.as_str(), "2024-03-15");
}

#[test]
fn date_from_page_text() {
    let html = body("<p>2022/07/01 (金) に公開</p>");
    let article = extract(&html, "").expect("extracts");
    assert_eq!(article.published.as_str(), "2022-07-01");
}

#[test]
fn meta_date_wins_over_page_text() {
    let html = r#"<html><head><meta property="article:published_time" content="2024-01-02"></head>
        <body><p>2020/01/01に公開</p><div class="znc"><p>Body</p></div></body></html>"#;
    let article = extract(html, "").expect("extracts");
    assert_eq!(article.published.as_str(), "2024-01-02");
}

#[test]
fn impossible_calendar_date_is_rejected() {
    let html = body("<p>2024/02/30に公開</p>");
    let article = extract(&html, "").expect("extracts");
    assert!(article.published.is_empty());
}

#[test]
fn updated_line_is_not_a_publication_date() {
    let html = body("<p>2024/03/15に更新</p>");
    let article = extract(&html, "").expect("extracts");
    assert!(article.published.is_empty());
}
