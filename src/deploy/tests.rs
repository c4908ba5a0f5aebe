use super::*;
use crate::ledger::LEDGER_FILE_NAME;
use crate::testing::config_under;
use chrono::NaiveDate;
use tempfile::TempDir;

fn at(second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(9, 30, second)
        .unwrap()
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn use_assets(config: &mut Config, root: &Path) -> PathBuf {
    let assets = root.join("assets");
    config.paths.assets_dir = Some(assets.clone());
    assets
}

fn backup_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_deploy_copies_assets_recursively() {
    let root = TempDir::new().unwrap();
    let mut config = config_under(root.path());
    let assets = use_assets(&mut config, root.path());
    write(&assets.join("config"), "font-size = 13\n");
    write(&assets.join("themes/dusk"), "background = 101010\n");

    let report = deploy(&config, at(0), false).unwrap();

    assert_eq!(report.copied, 2);
    assert!(report.backup.is_none());
    let deployed = config.paths.config_dir.join("themes/dusk");
    assert_eq!(std::fs::read_to_string(deployed).unwrap(), "background = 101010\n");
}

#[test]
fn test_deploy_backs_up_existing_config_without_ledger() {
    let root = TempDir::new().unwrap();
    let mut config = config_under(root.path());
    let assets = use_assets(&mut config, root.path());
    write(&assets.join("config"), "theme = new\n");
    write(&config.paths.config_dir.join("config"), "theme = old\n");
    write(&config.ledger_path(), "PLATFORM=linux\n");

    let report = deploy(&config, at(0), false).unwrap();

    let backup = report.backup.unwrap();
    assert!(backup.ends_with("backup_20261018_093000"));
    assert_eq!(std::fs::read_to_string(backup.join("config")).unwrap(), "theme = old\n");
    assert!(!backup.join(LEDGER_FILE_NAME).exists());
    assert!(config.ledger_path().exists());
}

#[test]
fn test_ledger_alone_is_not_backed_up() {
    let root = TempDir::new().unwrap();
    let config = config_under(root.path());
    write(&config.ledger_path(), "PLATFORM=linux\n");

    let made = create_backup(&config.paths.config_dir, &config.paths.backup_dir, at(0)).unwrap();
    assert!(made.is_none());
    assert!(!config.paths.backup_dir.exists());
}

#[test]
fn test_seven_backups_keep_five_newest() {
    let root = TempDir::new().unwrap();
    let mut config = config_under(root.path());
    let assets = use_assets(&mut config, root.path());
    write(&assets.join("config"), "font-size = 13\n");

    for run in 0..7 {
        write(&config.paths.config_dir.join("config"), &format!("run = {run}\n"));
        deploy(&config, at(run), false).unwrap();
    }

    assert_eq!(
        backup_names(&config.paths.backup_dir),
        [
            "backup_20261018_093002",
            "backup_20261018_093003",
            "backup_20261018_093004",
            "backup_20261018_093005",
            "backup_20261018_093006",
        ]
    );
}

#[test]
fn test_same_second_backups_do_not_collide() {
    let root = TempDir::new().unwrap();
    let config = config_under(root.path());
    write(&config.paths.config_dir.join("config"), "x\n");

    let first = create_backup(&config.paths.config_dir, &config.paths.backup_dir, at(5)).unwrap();
    let second = create_backup(&config.paths.config_dir, &config.paths.backup_dir, at(5)).unwrap();

    assert_ne!(first, second);
    assert!(second.unwrap().ends_with("backup_20261018_093005-1"));
}

#[test]
fn test_prune_ignores_foreign_directories() {
    let root = TempDir::new().unwrap();
    let backups = root.path().join("backups");
    for name in ["backup_20260101_000000", "backup_20260102_000000", "keep-me"] {
        std::fs::create_dir_all(backups.join(name)).unwrap();
    }

    let pruned = prune_backups(&backups, 1).unwrap();

    assert_eq!(pruned, [backups.join("backup_20260101_000000")]);
    assert_eq!(backup_names(&backups), ["backup_20260102_000000", "keep-me"]);
}

#[test]
fn test_dry_run_touches_nothing() {
    let root = TempDir::new().unwrap();
    let mut config = config_under(root.path());
    let assets = use_assets(&mut config, root.path());
    write(&assets.join("config"), "font-size = 13\n");

    deploy(&config, at(0), true).unwrap();
    assert!(!config.paths.config_dir.exists());
}

#[test]
fn test_missing_assets_is_an_error() {
    let root = TempDir::new().unwrap();
    let mut config = config_under(root.path());
    config.paths.assets_dir = Some(root.path().join("nowhere"));
    let err = deploy(&config, at(0), false).unwrap_err();
    assert!(err.to_string().contains("Configuration files not found"));
}

#[test]
fn test_bundled_config_deploys_without_assets_dir() {
    let root = TempDir::new().unwrap();
    let config = config_under(root.path());
    assert!(config.paths.assets_dir.is_none());

    let report = deploy(&config, at(0), false).unwrap();

    assert_eq!(report.copied, 1);
    let deployed = std::fs::read_to_string(config.paths.config_dir.join("config")).unwrap();
    assert!(deployed.contains("font-family"));
}

#[test]
fn test_check_assets_rejects_missing_dir() {
    let root = TempDir::new().unwrap();
    let mut config = config_under(root.path());
    check_assets(&config).unwrap();

    config.paths.assets_dir = Some(root.path().join("nowhere"));
    let err = check_assets(&config).unwrap_err();
    assert!(err.to_string().contains("Configuration files not found"));
}

#[test]
fn test_prune_orders_same_second_suffixes_numerically() {
    let root = TempDir::new().unwrap();
    let config = config_under(root.path());
    write(&config.paths.config_dir.join("config"), "x\n");
    for _ in 0..12 {
        create_backup(&config.paths.config_dir, &config.paths.backup_dir, at(5)).unwrap();
    }

    prune_backups(&config.paths.backup_dir, 3).unwrap();

    assert_eq!(
        backup_names(&config.paths.backup_dir),
        [
            "backup_20261018_093005-10",
            "backup_20261018_093005-11",
            "backup_20261018_093005-9",
        ]
    );
}
