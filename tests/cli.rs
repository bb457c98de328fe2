use assert_cmd::Command;
use predicates::prelude::*;

/// Run the binary with an isolated HOME so no real settings or logs are touched.
fn easypay(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("easypay").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn products_search_finds_iphone() {
    let home = tempfile::tempdir().unwrap();
    easypay(&home)
        .args(["products", "--search", "iphone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("iPhone 15 Pro"))
        .stdout(predicate::str::contains("MacBook").not())
        .stdout(predicate::str::contains("1 item(s)"));
}

#[test]
fn products_without_search_lists_all() {
    let home = tempfile::tempdir().unwrap();
    easypay(&home)
        .arg("products")
        .assert()
        .success()
        .stdout(predicate::str::contains("8 item(s)"))
        .stdout(predicate::str::contains("Apple Watch Ultra"));
}

#[test]
fn products_search_without_match() {
    let home = tempfile::tempdir().unwrap();
    easypay(&home)
        .args(["products", "--search", "fridge"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No products match"));
}

#[test]
fn quote_twenty_percent_iphone() {
    let home = tempfile::tempdir().unwrap();
    easypay(&home)
        .args(["quote", "1", "--deposit", "20", "--firm", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GH₵ 3,199.80"))
        .stdout(predicate::str::contains("GH₵ 12,799.20"))
        .stdout(predicate::str::contains("CalBank"));
}

#[test]
fn quote_rejects_unknown_tier() {
    let home = tempfile::tempdir().unwrap();
    easypay(&home)
        .args(["quote", "iPhone 15 Pro", "--deposit", "25"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid deposit: 25%"));
}

#[test]
fn quote_rejects_unknown_product() {
    let home = tempfile::tempdir().unwrap();
    easypay(&home)
        .args(["quote", "Nokia 3310", "--deposit", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown product: Nokia 3310"));
}

#[test]
fn firms_lists_five_banks() {
    let home = tempfile::tempdir().unwrap();
    easypay(&home)
        .arg("firms")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stanbic Bank"))
        .stdout(predicate::str::contains("9.5% p.a."))
        .stdout(predicate::str::contains("10%, 20%, 30%, 40%, 50%"));
}

#[test]
fn catalog_file_replaces_products() {
    let home = tempfile::tempdir().unwrap();
    let catalog = home.path().join("catalog.json");
    std::fs::write(
        &catalog,
        r#"{"products": [{"id": 1, "name": "Infinix Hot 40", "price": "GH₵ 2,000",
            "image": "", "description": "Big battery"}]}"#,
    )
    .unwrap();
    easypay(&home)
        .args(["quote", "1", "--deposit", "50", "--catalog"])
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Infinix Hot 40"))
        .stdout(predicate::str::contains("GH₵ 1,000.00"));
}

#[test]
fn init_writes_settings_once() {
    let home = tempfile::tempdir().unwrap();
    easypay(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default settings"));
    let written = home.path().join(".config").join("easypay").join("settings.json");
    let content = std::fs::read_to_string(written).unwrap();
    assert!(content.contains("\"order_delay_ms\": 1500"));

    easypay(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exist"));
}

#[test]
fn logs_go_to_file() {
    let home = tempfile::tempdir().unwrap();
    easypay(&home).arg("firms").assert().success();
    let log = home.path().join("data").join("easypay").join("easypay.log");
    let content = std::fs::read_to_string(log).unwrap();
    assert!(content.contains("logging initialized"));
}
