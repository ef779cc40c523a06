use practice_core::model::{CellValue, Table};
use services::{Sampler, TableSource};
use storage::StaticTableLoader;

use super::test_harness::{setup_view_harness, setup_view_harness_with_loader};

fn homework() -> Table {
    Table::new(
        vec!["Chinese".into(), "Pinyin".into(), "English".into()],
        vec![
            vec!["你好".into(), "nǐ hǎo".into(), "Hello".into()],
            vec!["我喜欢学习中文".into(), CellValue::Missing, "I like studying Chinese".into()],
            vec!["谢谢".into(), "xièxie".into(), "".into()],
        ],
    )
    .unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_not_found_and_upload_fallback() {
    let mut harness = setup_view_harness(None, Sampler::Random);

    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("not found. Please check the file path."),
        "missing not-found message in {html}"
    );
    assert!(html.contains("Choose an Excel file"), "missing upload label in {html}");
    assert!(html.contains(".xlsx,.xls"), "missing accept filter in {html}");
    assert!(
        html.contains("No data loaded. Please check the file path or upload a file."),
        "missing warning in {html}"
    );
    assert!(!html.contains("Get Random Sentence"), "unexpected draw button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_fresh_statistics() {
    let mut harness = setup_view_harness(Some(homework()), Sampler::Random);

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Get Random Sentence"), "missing draw button in {html}");
    assert!(html.contains("Total rows: 3"), "missing file info in {html}");
    assert!(html.contains("Columns: Chinese, Pinyin, English"), "missing columns in {html}");
    assert!(html.contains("Total Practices"), "missing metric in {html}");
    assert!(html.contains("0.0%"), "missing coverage in {html}");
    assert!(
        html.contains("practiced 0 out of 3 unique sentences"),
        "missing caption in {html}"
    );
    assert!(!html.contains("Row #"), "unexpected card in {html}");
    assert!(html.contains("加油! Keep practicing!"), "missing footer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_drawn_sentence() {
    let mut harness = setup_view_harness(Some(homework()), Sampler::Fixed(1));
    let loaded = harness.load_default();
    harness
        .service
        .draw(harness.session, &loaded)
        .await
        .expect("draw sentence");

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("我喜欢学习中文"), "missing sentence in {html}");
    assert!(html.contains("field-value--large"), "missing large text in {html}");
    assert!(html.contains("field-value--default"), "missing default text in {html}");
    assert!(!html.contains("Pinyin:"), "blank field rendered in {html}");
    assert!(html.contains("Row #2 of 3"), "missing caption in {html}");
    assert!(html.contains("View Raw Data"), "missing raw data in {html}");
    assert!(html.contains("33.3%"), "missing coverage in {html}");
    assert!(
        html.contains("practiced 1 out of 3 unique sentences"),
        "missing caption in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_rendering_does_not_count() {
    let mut harness = setup_view_harness(Some(homework()), Sampler::Fixed(0));
    let loaded = harness.load_default();
    harness
        .service
        .draw(harness.session, &loaded)
        .await
        .expect("draw sentence");

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Row #1 of 3"), "missing caption in {html}");
    let stats = harness
        .service
        .stats(harness.session, &loaded)
        .await
        .expect("stats");
    assert_eq!(stats.practice_count, 1);
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_empty_table() {
    let table = Table::new(vec!["Chinese".into()], Vec::new()).unwrap();
    let mut harness = setup_view_harness(Some(table), Sampler::Random);

    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("No sentences found in this file."),
        "missing empty message in {html}"
    );
    assert!(!html.contains("Get Random Sentence"), "unexpected draw button in {html}");
    assert!(html.contains("0.0%"), "missing coverage in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_upload_replaces_missing_file() {
    let loader = StaticTableLoader::new().with_table("homework.xlsx", homework());
    let mut harness = setup_view_harness_with_loader(loader, Sampler::Random);
    harness.rebuild();
    assert!(harness.render().contains("Choose an Excel file"));

    harness
        .upload(Ok(TableSource::upload("homework.xlsx", vec![0x50, 0x4b])))
        .await;
    let html = harness.render();
    assert!(
        html.contains("File uploaded successfully!"),
        "missing success banner in {html}"
    );
    assert!(html.contains("Get Random Sentence"), "missing draw button in {html}");
    assert!(html.contains("Total rows: 3"), "missing file info in {html}");
    assert!(!html.contains("No data loaded."), "stale warning in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_undecodable_upload_shows_load_error() {
    let mut harness = setup_view_harness(None, Sampler::Random);
    harness.rebuild();

    harness
        .upload(Ok(TableSource::upload("junk.xlsx", b"not a workbook".to_vec())))
        .await;
    let html = harness.render();
    assert!(html.contains("Error loading file:"), "missing decode message in {html}");
    assert!(
        !html.contains("File uploaded successfully!"),
        "unexpected success banner in {html}"
    );
    assert!(html.contains("Choose an Excel file"), "missing upload fallback in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_unreadable_upload_shows_message() {
    let mut harness = setup_view_harness(None, Sampler::Random);
    harness.rebuild();

    harness
        .upload(Err("Error reading uploaded file: permission denied".to_string()))
        .await;
    let html = harness.render();
    assert!(
        html.contains("Error reading uploaded file: permission denied"),
        "missing read error in {html}"
    );
    assert!(html.contains("No data loaded."), "missing warning in {html}");
}
