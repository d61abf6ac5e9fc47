//! End-to-end tests: report descriptions in, paginated surfaces and PDF
//! bytes out.

use indexmap::IndexMap;

use relato::model::{
    HeaderData, IconCardData, ListData, ReportDocument, ScoreData, ScoreNotValidData,
    ScoreRangeData, SectionComponent, TableData,
};
use relato::pagination::PaginationContext;
use relato::style::palette;
use relato::{render_document, BuildOptions, ReportBuilder};

fn pairs(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn header() -> HeaderData {
    HeaderData {
        category_name: "Credit analysis".to_string(),
        product_name: "Positive report".to_string(),
        entity_name: "Acme Ltda".to_string(),
        entity_id: "12.345.678/0001-00".to_string(),
        date_time: "25/08/2026 14:32".to_string(),
        protocol: "2026.0825.4417".to_string(),
        pagination_template: "Page {page} of {total}".to_string(),
    }
}

fn list_section() -> SectionComponent {
    SectionComponent::List {
        title: "Identification".to_string(),
        data: ListData {
            fields: pairs(&[("name", "Name"), ("id", "ID"), ("status", "Status")]),
            items: pairs(&[("name", "Acme Ltda"), ("id", "12.345.678/0001-00"), ("status", "Active")]),
        },
    }
}

fn table_section(rows: usize) -> SectionComponent {
    SectionComponent::Table {
        title: "Payment history".to_string(),
        data: TableData {
            columns: pairs(&[("date", "Date"), ("value", "Value")]),
            overview: pairs(&[("Records", "many")]),
            rows: (0..rows)
                .map(|i| {
                    pairs(&[
                        ("date", &format!("2026-01-{:02}", i % 28 + 1) as &str),
                        ("value", &format!("{i}.00")),
                    ])
                })
                .collect(),
            ..Default::default()
        },
    }
}

fn score_section(score: i64) -> SectionComponent {
    SectionComponent::Score {
        title: "Credit score".to_string(),
        data: ScoreData {
            score,
            min_score: 300,
            aux_title: "Default probability".to_string(),
            aux_template: "The default probability is {}.".to_string(),
            not_valid: ScoreNotValidData {
                color: palette::GRAY,
                aux_template: "Not enough information to compute a score.".to_string(),
                description: "Score unavailable".to_string(),
                aux_value: "Unavailable".to_string(),
            },
            ranges: vec![
                ScoreRangeData {
                    max_score: 500,
                    color: palette::RED,
                    description: "High risk".to_string(),
                    aux_value: "High".to_string(),
                },
                ScoreRangeData {
                    max_score: 1000,
                    color: palette::GREEN,
                    description: "Low risk".to_string(),
                    aux_value: "Low".to_string(),
                },
            ],
        },
    }
}

fn builder_with(sections: Vec<SectionComponent>) -> ReportBuilder {
    let mut builder = ReportBuilder::new(header());
    for section in sections {
        builder.add_section(section);
    }
    builder
}

#[test]
fn test_every_final_page_has_resolved_totals() {
    let builder = builder_with(vec![list_section(), table_section(200)]);
    let total = builder.paginate(PaginationContext::discovery()).len();
    assert!(total > 1);

    let pages = builder.paginate(PaginationContext::finalized(total));
    assert_eq!(pages.len(), total);
    for (i, page) in pages.iter().enumerate() {
        let expected = format!("Page {} of {}", i + 1, total);
        assert!(
            page.text_content().iter().any(|t| *t == expected),
            "page {} is missing '{}'",
            i + 1,
            expected
        );
    }
}

#[test]
fn test_no_row_is_lost_or_duplicated_across_pages() {
    let rows = 180;
    let builder = builder_with(vec![table_section(rows)]);
    let pages = builder.paginate(PaginationContext::discovery());
    let all: Vec<String> = pages.iter().flat_map(|p| p.text_content()).collect();
    for i in 0..rows {
        let value = format!("{i}.00");
        let count = all.iter().filter(|t| **t == value).count();
        assert_eq!(count, 1, "row value {value} appeared {count} times");
    }
}

#[test]
fn test_table_header_row_repeats_on_continuations() {
    let builder = builder_with(vec![table_section(200)]);
    let pages = builder.paginate(PaginationContext::discovery());
    assert!(pages.len() > 1);
    for (i, page) in pages.iter().enumerate() {
        assert!(
            page.text_content().iter().any(|t| t == "Date"),
            "no table header on page {}",
            i + 1
        );
    }
}

#[test]
fn test_section_title_is_not_stranded_at_page_bottom() {
    // A run of tables sized so some section start lands near a page
    // bottom. Wherever a title appears, its table header must be on the
    // same page.
    let sections: Vec<SectionComponent> = (0..8).map(|_| table_section(20)).collect();
    let builder = builder_with(sections);
    let pages = builder.paginate(PaginationContext::discovery());
    for (i, page) in pages.iter().enumerate() {
        let text = page.text_content();
        let titles = text.iter().filter(|t| *t == "Payment history").count();
        let headers = text.iter().filter(|t| *t == "Date").count();
        assert!(
            headers >= titles,
            "page {} has {titles} section title(s) but {headers} table header(s)",
            i + 1
        );
    }
}

#[test]
fn test_build_is_deterministic() {
    let a = builder_with(vec![list_section(), score_section(812), table_section(120)])
        .build()
        .unwrap();
    let b = builder_with(vec![list_section(), score_section(812), table_section(120)])
        .build()
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_pdf_is_structurally_valid() {
    let pdf = builder_with(vec![list_section(), table_section(150)])
        .build()
        .unwrap();
    assert!(pdf.starts_with(b"%PDF-1.7"));
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/Type /Catalog"));
    assert!(text.contains("/Type /Pages"));
    assert!(text.contains("/FlateDecode"));
    assert!(text.contains("/BaseFont /Helvetica"));
    assert!(text.contains("startxref"));
    assert!(text.trim_end().ends_with("%%EOF"));

    // Page count in the tree matches the pagination result.
    let builder = builder_with(vec![list_section(), table_section(150)]);
    let pages = builder.paginate(PaginationContext::discovery()).len();
    assert!(text.contains(&format!("/Count {pages}")));
}

#[test]
fn test_invalid_score_uses_fallback_and_hides_needle() {
    let builder = builder_with(vec![score_section(100)]);
    let pages = builder.paginate(PaginationContext::discovery());
    let text: Vec<String> = pages.iter().flat_map(|p| p.text_content()).collect();
    assert!(text.iter().any(|t| t.contains("Not enough information")));

    let needles = pages
        .iter()
        .flat_map(|p| p.ops())
        .filter(|op| matches!(op, relato::surface::DrawOp::Polygon { points, .. } if points.len() == 3))
        .count();
    assert_eq!(needles, 0);
}

#[test]
fn test_valid_score_sentence_names_current_range() {
    let builder = builder_with(vec![score_section(812)]);
    let pages = builder.paginate(PaginationContext::discovery());
    let text: Vec<String> = pages.iter().flat_map(|p| p.text_content()).collect();
    assert!(text.iter().any(|t| t.contains("probability is low.")));
    assert!(text.iter().any(|t| t == "812"));
}

#[test]
fn test_icon_cards_render_tolerantly_with_unknown_icon() {
    let section = SectionComponent::IconCards {
        title: "Alerts".to_string(),
        cards: vec![IconCardData {
            title: "Mystery".to_string(),
            description: "Unknown icon name should not abort the build.".to_string(),
            icon: "sparkles".to_string(),
            color: palette::BLUE,
        }],
    };
    let pdf = builder_with(vec![section]).build().unwrap();
    assert!(pdf.starts_with(b"%PDF-1.7"));
}

#[test]
fn test_strict_mode_rejects_overflowing_layout() {
    // A single row whose nested text is taller than a page cannot split
    // and has to overflow.
    let giant = "word ".repeat(4000);
    let section = SectionComponent::Table {
        title: "Oversized".to_string(),
        data: TableData {
            columns: pairs(&[("c", "Column")]),
            nested_fields: pairs(&[("n", "Nested")]),
            rows: vec![pairs(&[("c", "x"), ("n", giant.as_str())])],
            ..Default::default()
        },
    };

    let result = builder_with(vec![section.clone()])
        .with_options(BuildOptions {
            strict_overflow: true,
            ..Default::default()
        })
        .build();
    assert!(matches!(
        result,
        Err(relato::ReportError::Overflow { .. })
    ));

    // The default build still produces a document.
    let pdf = builder_with(vec![section]).build().unwrap();
    assert!(pdf.starts_with(b"%PDF-1.7"));
}

#[test]
fn test_json_report_renders_same_as_programmatic() {
    let document = ReportDocument {
        header: header(),
        sections: vec![list_section(), score_section(812)],
    };
    let json = serde_json::to_string(&document).unwrap();
    let from_json = relato::render_json(&json, BuildOptions::default()).unwrap();
    let programmatic = render_document(document, BuildOptions::default()).unwrap();
    assert_eq!(from_json, programmatic);
}

#[test]
fn test_bad_json_is_a_json_error() {
    let result = relato::render_json("{ not json", BuildOptions::default());
    assert!(matches!(result, Err(relato::ReportError::Json(_))));
}
