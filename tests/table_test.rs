use rs_boilerprune::dom::{self, Selection};
use rs_boilerprune::{filter_document, filter_html, Options, Stage};

fn filter(html: &str) -> String {
    match filter_html(html, &Options::default()) {
        Ok(cleaned) => cleaned,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

fn filtered_body_text(html: &str) -> String {
    let doc = dom::parse(html);
    filter_document(&doc, &Options::default()).expect("default options are valid");
    dom::body(&doc).expect("body survives").text().to_string()
}

#[test]
fn single_column_layout_table_becomes_paragraphs() {
    let html = r#"
        <body>
          <article>
            <table><tr><td><p>CELL_ONE holds a paragraph.</p></td></tr><tr><td><p>CELL_TWO holds another.</p></td></tr></table>
          </article>
        </body>
    "#;

    let cleaned = filter(html);
    assert!(!cleaned.contains("<table"));
    assert!(!cleaned.contains("<td"));
    assert!(cleaned.contains("<p>CELL_ONE holds a paragraph.</p>"));
    assert!(cleaned.contains("<p>CELL_TWO holds another.</p>"));
}

#[test]
fn single_column_table_with_phrasing_cells_gets_one_paragraph_per_row() {
    let html = r#"<body><article><table><tr><td>ROW_ONE <b>bold</b></td></tr><tr><td>ROW_TWO</td></tr></table></article></body>"#;

    let cleaned = filter(html);
    assert!(cleaned.contains("<p>ROW_ONE <b>bold</b></p>"));
    assert!(cleaned.contains("<p>ROW_TWO</p>"));
}

#[test]
fn three_row_single_column_table_leaves_no_table_markup() {
    let html = r#"<body><article><table><tr><td>FIRST</td></tr><tr><td>SECOND</td></tr><tr><td>THIRD</td></tr></table></article></body>"#;

    let cleaned = filter(html);
    for tag in ["<table", "<tbody", "<tr", "<td"] {
        assert!(!cleaned.contains(tag), "{tag} left in {cleaned}");
    }
    assert!(cleaned.contains("<p>FIRST</p><p>SECOND</p><p>THIRD</p>"));
}

#[test]
fn layout_table_with_spacer_cells_is_unwrapped() {
    let doc = dom::parse(
        "<body><section><table><tr><td>one</td><td></td></tr><tr><td>two</td><td> </td></tr><tr><td>three</td><td></td></tr></table></section></body>",
    );
    let report = filter_document(&doc, &Options::default()).expect("default options are valid");

    assert_eq!(report.changes(Stage::UnwrapSingleColumnTables), 1);
    let body = dom::body(&doc).expect("body survives");
    assert!(dom::elements_by_tag(&body, "table").is_empty());
    assert_eq!(
        Selection::from(body).inner_html().as_ref(),
        "<section><p>one</p><p>two</p><p>three</p></section>"
    );
}

#[test]
fn data_tables_with_several_columns_are_kept() {
    let html = r#"
        <body>
          <article>
            <p>Intro paragraph before the table.</p>
            <table>
              <tr><th>H1</th><th>H2</th></tr>
              <tr><td>A</td><td>B</td></tr>
            </table>
          </article>
        </body>
    "#;

    let cleaned = filter(html);
    assert!(cleaned.contains("<table>"));
    assert!(cleaned.contains("<th>H1</th>"));
    assert!(cleaned.contains("<td>A</td>"));
}

#[test]
fn single_item_list_is_unwrapped_without_merging_words() {
    assert_eq!(filtered_body_text("<body><section>A <ul><li>X</li></ul> B</section></body>"), "A X B");
}

#[test]
fn single_empty_item_list_leaves_one_space() {
    assert_eq!(filtered_body_text("<body><section>A<ul><li></li></ul>B</section></body>"), "A B");
}

#[test]
fn lists_with_several_items_are_kept() {
    let html = r#"<body><article><p>Intro text.</p><ul><li>one</li><li>two</li></ul></article></body>"#;

    let cleaned = filter(html);
    assert!(cleaned.contains("<ul><li>one</li><li>two</li></ul>"));
}

#[test]
fn nested_single_item_lists_collapse_completely() {
    let doc = dom::parse("<body><section><ul><li><ol><li>DEEP</li></ol></li></ul></section></body>");
    let report = filter_document(&doc, &Options::default()).expect("default options are valid");

    assert_eq!(report.changes(Stage::UnwrapSingleItemLists), 2);
    let body = dom::body(&doc).expect("body survives");
    assert!(dom::elements_by_tag(&body, "li").is_empty());
    assert_eq!(Selection::from(body).inner_html().as_ref(), "<section>DEEP</section>");
}
