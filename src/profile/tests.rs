use super::*;
use tempfile::TempDir;

#[test]
fn test_detect_profile() {
    let home = Path::new("/home/ada");
    assert_eq!(
        detect(home, Some("/usr/bin/zsh"), Platform::Linux),
        home.join(".zshrc")
    );
    assert_eq!(
        detect(home, Some("/bin/bash"), Platform::Macos),
        home.join(".bash_profile")
    );
    assert_eq!(detect(home, None, Platform::Wsl), home.join(".bashrc"));
}

#[test]
fn test_append_line_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let profile = dir.path().join(".bashrc");
    std::fs::write(&profile, "alias ll='ls -l'").unwrap();
    let line = path_export(Path::new("/home/ada/.local/bin"));

    assert!(append_line(&profile, &line).unwrap());
    assert!(!append_line(&profile, &line).unwrap());

    let content = std::fs::read_to_string(&profile).unwrap();
    assert_eq!(
        content,
        "alias ll='ls -l'\n\n# Added by ghostty-setup\nexport PATH=\"/home/ada/.local/bin:$PATH\"\n"
    );
}

#[test]
fn test_append_creates_missing_profile() {
    let dir = TempDir::new().unwrap();
    let profile = dir.path().join(".zshrc");
    assert!(append_line(&profile, "eval \"$(/opt/homebrew/bin/brew shellenv)\"").unwrap());
    assert!(profile.exists());
}

#[test]
fn test_remove_reverses_append() {
    let dir = TempDir::new().unwrap();
    let profile = dir.path().join(".zshrc");
    let original = "export EDITOR=nvim\n";
    std::fs::write(&profile, original).unwrap();
    let bin = Path::new("/home/ada/.local/bin");

    append_line(&profile, &path_export(bin)).unwrap();
    append_line(&profile, &brew_shellenv(Path::new("/opt/homebrew/bin/brew"))).unwrap();
    let kinds = [Appended::PathExport(bin.to_path_buf()), Appended::BrewShellenv];
    let removed = remove_lines(&profile, &kinds).unwrap();

    assert_eq!(removed, 4);
    assert_eq!(std::fs::read_to_string(&profile).unwrap(), original);
}

#[test]
fn test_remove_without_matches_leaves_file_alone() {
    let dir = TempDir::new().unwrap();
    let profile = dir.path().join(".bashrc");
    std::fs::write(&profile, "export FOO=1").unwrap();
    let kinds = [Appended::PathExport(PathBuf::from("/x/bin"))];
    assert_eq!(remove_lines(&profile, &kinds).unwrap(), 0);
    assert_eq!(std::fs::read_to_string(&profile).unwrap(), "export FOO=1");
}

/// Known risk: a user-authored line matching a removal pattern is deleted
/// along with ours.
#[test]
fn test_remove_also_deletes_user_authored_shellenv() {
    let dir = TempDir::new().unwrap();
    let profile = dir.path().join(".zprofile");
    std::fs::write(
        &profile,
        "# my own homebrew setup\neval \"$(/usr/local/bin/brew shellenv)\"\n",
    )
    .unwrap();

    let removed = remove_lines(&profile, &[Appended::BrewShellenv]).unwrap();

    assert_eq!(removed, 1);
    assert_eq!(
        std::fs::read_to_string(&profile).unwrap(),
        "# my own homebrew setup\n"
    );
}

#[test]
fn test_remove_only_requested_kinds() {
    let dir = TempDir::new().unwrap();
    let profile = dir.path().join(".zshrc");
    let bin = Path::new("/home/ada/.local/bin");
    let shellenv = brew_shellenv(Path::new("/opt/homebrew/bin/brew"));
    append_line(&profile, &shellenv).unwrap();
    let with_brew_only = std::fs::read_to_string(&profile).unwrap();
    append_line(&profile, &path_export(bin)).unwrap();

    let removed = remove_lines(&profile, &[Appended::PathExport(bin.to_path_buf())]).unwrap();

    assert_eq!(removed, 2);
    assert_eq!(std::fs::read_to_string(&profile).unwrap(), with_brew_only);
}
