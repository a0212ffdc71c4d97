use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bin() -> Command {
    Command::cargo_bin("saas_review_scraper").unwrap()
}

fn g2_listing(entries: &[(&str, &str, &str)]) -> String {
    let blocks: Vec<String> = entries
        .iter()
        .map(|(title, body, date)| {
            format!(
                r#"<div class="paper paper--white paper--box">
                    <h3>{title}</h3>
                    <div class="formatted-text">{body}</div>
                    <time datetime="{date}T00:00:00Z">{date}</time>
                </div>"#
            )
        })
        .collect();
    format!("<html><body>{}</body></html>", blocks.join("\n"))
}

#[test]
fn scrapes_reviews_into_json_file() {
    let mut server = mockito::Server::new();

    let page1 = g2_listing(&[
        ("Great onboarding", "Setup took a day.", "2024-06-10"),
        ("Früh begeistert", "Sehr übersichtlich.", "2024-06-02"),
    ]);
    let _p1 = server
        .mock("GET", "/products/acme-corp/reviews?page=1")
        .with_body(&page1)
        .create();
    let _p2 = server
        .mock("GET", "/products/acme-corp/reviews?page=2")
        .with_status(404)
        .create();

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("acme.json");

    bin()
        .args([
            "--company",
            "Acme Corp",
            "--source",
            "g2",
            "--start_date",
            "2024-05-01",
            "--end_date",
            "2024-06-30",
            "--base-url",
            &server.url(),
        ])
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Scraped 2 reviews"));

    let text = std::fs::read_to_string(&out).unwrap();
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();

    let reviews = v.as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0]["title"], "Great onboarding");
    assert_eq!(reviews[0]["date"], "2024-06-10");
    assert_eq!(reviews[0]["source"], "G2");
    assert_eq!(reviews[1]["review"], "Sehr übersichtlich.");

    // Non-ASCII survives the file unescaped
    assert!(text.contains("Früh begeistert"));
}

#[test]
fn empty_scrape_writes_empty_array() {
    let mut server = mockito::Server::new();

    let _p1 = server
        .mock("GET", "/products/acme/reviews?page=1")
        .with_status(404)
        .create();

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("empty.json");

    bin()
        .args([
            "--company",
            "Acme",
            "--source",
            "g2",
            "--start_date",
            "2024-05-01",
            "--end_date",
            "2024-06-30",
            "--base-url",
            &server.url(),
        ])
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Scraped 0 reviews"));

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "[]");
}

#[test]
fn inverted_window_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("never.json");

    bin()
        .args([
            "--company",
            "Acme",
            "--source",
            "g2",
            "--start_date",
            "2024-06-01",
            "--end_date",
            "2024-05-01",
        ])
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("must not be after"));

    assert!(!out.exists());
}

#[test]
fn malformed_date_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("never.json");

    bin()
        .args([
            "--company",
            "Acme",
            "--source",
            "capterra",
            "--start_date",
            "June 1, 2024",
            "--end_date",
            "2024-06-30",
        ])
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("expected YYYY-MM-DD"));

    assert!(!out.exists());
}
