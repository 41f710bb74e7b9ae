use phpfetch::commands::install::install_with_config;
use phpfetch::core::config::Config;
use phpfetch::core::download::Downloader;
use phpfetch::{Installer, PhpFetchError};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tiny_http::{Response, Server};
use zip::write::SimpleFileOptions;

const ARCHIVE: &str = "php-7.0.0-Win32-VC14-x64.zip";

/// Minimal stand-in for a PHP Windows build.
fn php_zip() -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    writer.add_directory("ext/", options).unwrap();
    writer.start_file("php.exe", options).unwrap();
    writer.write_all(b"MZ fake php binary").unwrap();
    writer.start_file("ext/php_openssl.dll", options).unwrap();
    writer.write_all(b"MZ fake extension").unwrap();
    writer.start_file("php.ini-development", options).unwrap();
    writer.write_all(b"; PHP development settings\n").unwrap();

    writer.finish().unwrap().into_inner()
}

/// Local archive host: serves `archive` at `/<ARCHIVE>` and 404 elsewhere.
/// Every requested path is recorded.
struct ArchiveHost {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ArchiveHost {
    fn start(archive: Vec<u8>) -> Self {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                let url = request.url().to_string();
                log.lock().unwrap().push(url.clone());

                let response = if url == format!("/{ARCHIVE}") {
                    Response::from_data(archive.clone())
                } else {
                    Response::from_data(b"not found".to_vec()).with_status_code(404)
                };
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}/"),
            requests,
        }
    }

    fn installer(&self) -> Installer {
        Installer::with_downloader(&self.base_url, Downloader::new().unwrap())
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

fn assert_extracted(dir: &Path) {
    assert!(dir.join("ext").is_dir());
    assert_eq!(std::fs::read(dir.join("php.exe")).unwrap(), b"MZ fake php binary");
    assert_eq!(
        std::fs::read(dir.join("ext/php_openssl.dll")).unwrap(),
        b"MZ fake extension"
    );
    assert_eq!(
        std::fs::read_to_string(dir.join("php.ini-development")).unwrap(),
        "; PHP development settings\n"
    );
}

#[test]
fn install_downloads_and_extracts() {
    let host = ArchiveHost::start(php_zip());
    let temp = tempfile::tempdir().unwrap();
    let dest = temp.path().join("php-7.0.0");

    let path = host.installer().install(ARCHIVE, &dest).unwrap();

    assert!(path.is_absolute());
    assert!(path
        .to_string_lossy()
        .ends_with(std::path::MAIN_SEPARATOR));
    assert_eq!(
        std::fs::canonicalize(&path).unwrap(),
        std::fs::canonicalize(&dest).unwrap()
    );
    assert!(dest.join(ARCHIVE).is_file());
    assert_extracted(&dest);
    assert_eq!(
        host.requests.lock().unwrap().clone(),
        vec![format!("/{ARCHIVE}")]
    );
}

#[test]
fn second_install_reuses_archive_and_re_extracts() {
    let host = ArchiveHost::start(php_zip());
    let temp = tempfile::tempdir().unwrap();
    let dest = temp.path().join("php-7.0.0");
    let installer = host.installer();

    let first = installer.install(ARCHIVE, &dest).unwrap();

    // Local edits are overwritten by the re-extraction
    std::fs::write(dest.join("php.exe"), b"edited").unwrap();

    let second = installer.install(ARCHIVE, &dest).unwrap();

    assert_eq!(first, second);
    assert_eq!(host.request_count(), 1);
    assert_extracted(&dest);
}

#[test]
fn install_unknown_version_reports_url() {
    let host = ArchiveHost::start(php_zip());
    let temp = tempfile::tempdir().unwrap();
    let dest = temp.path().join("php");

    let err = host
        .installer()
        .install("php-0.0.0-missing.zip", &dest)
        .unwrap_err();

    match err {
        PhpFetchError::DownloadError { url, status } => {
            assert_eq!(url, format!("{}php-0.0.0-missing.zip", host.base_url));
            assert_eq!(status, 404);
        }
        other => panic!("unexpected error: {other}"),
    }
    // The destination is created before the download is attempted
    assert!(dest.is_dir());
    assert!(!dest.join("php-0.0.0-missing.zip").exists());
}

#[test]
fn install_with_corrupt_download_is_archive_error() {
    let host = ArchiveHost::start(b"<html>maintenance page</html>".to_vec());
    let temp = tempfile::tempdir().unwrap();
    let dest = temp.path().join("php");

    let err = host.installer().install(ARCHIVE, &dest).unwrap_err();

    assert!(matches!(err, PhpFetchError::ArchiveError { .. }));
}

#[test]
fn install_with_config_uses_configured_host() {
    let host = ArchiveHost::start(php_zip());
    let temp = tempfile::tempdir().unwrap();
    let dest = temp.path().join("tools").join("php");

    let mut config = Config::default();
    config.set_base_url(host.base_url.trim_end_matches('/')).unwrap();
    config.timeout_secs = Some(30);

    let path = install_with_config(&config, ARCHIVE, &dest).unwrap();

    assert!(path.is_absolute());
    assert_extracted(&dest);
    assert_eq!(host.request_count(), 1);
}
