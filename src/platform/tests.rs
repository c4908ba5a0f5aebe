use super::*;
use crate::testing::FakeProbe;

#[test]
fn test_classify_macos() {
    assert_eq!(Platform::classify("macos", false, None).unwrap(), Platform::Macos);
}

#[test]
fn test_classify_plain_linux() {
    let version = "Linux version 6.8.0-45-generic (buildd@lcy02-amd64-075)";
    assert_eq!(
        Platform::classify("linux", false, Some(version)).unwrap(),
        Platform::Linux
    );
}

#[test]
fn test_classify_wsl_from_kernel_string() {
    let version = "Linux version 5.15.153.1-microsoft-standard-WSL2";
    assert_eq!(
        Platform::classify("linux", false, Some(version)).unwrap(),
        Platform::Wsl
    );
}

#[test]
fn test_classify_wsl_from_env() {
    assert_eq!(Platform::classify("linux", true, None).unwrap(), Platform::Wsl);
}

#[test]
fn test_classify_unsupported() {
    let err = Platform::classify("windows", false, None).unwrap_err();
    assert!(err.to_string().contains("Unsupported operating system: windows"));
}

#[test]
fn test_platform_round_trips_through_str() {
    for p in [Platform::Linux, Platform::Macos, Platform::Wsl] {
        assert_eq!(p.as_str().parse::<Platform>(), Ok(p));
    }
    assert!("freebsd".parse::<Platform>().is_err());
}

#[test]
fn test_detect_package_manager_prefers_apt() {
    let probe = FakeProbe::default().with_binary("dnf").with_binary("apt-get");
    assert_eq!(
        PackageManager::detect(&probe, Platform::Linux),
        Some(PackageManager::Apt)
    );
}

#[test]
fn test_detect_package_manager_macos_needs_brew() {
    let probe = FakeProbe::default().with_binary("apt-get");
    assert_eq!(PackageManager::detect(&probe, Platform::Macos), None);
    let probe = probe.with_binary("brew");
    assert_eq!(
        PackageManager::detect(&probe, Platform::Macos),
        Some(PackageManager::Brew)
    );
}

#[test]
fn test_install_and_remove_commands() {
    assert_eq!(
        PackageManager::Pacman.install(&["chafa"]).to_string(),
        "pacman -S --needed --noconfirm chafa"
    );
    assert_eq!(
        PackageManager::Apt.remove(&["lazygit"]).to_string(),
        "apt-get remove -y lazygit"
    );
    assert!(!PackageManager::Brew.needs_root());
}
