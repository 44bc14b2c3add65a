//! Fetching remote icon sets into the cache directory
//!
//! Network I/O happens out of process: the resolver batches every uncached URI
//! and hands them to a [`Fetcher`] once per invocation. The default
//! [`ProcessFetcher`] runs `<program> fetch <cache_dir> <uri>...`, which ends up
//! in [`fetch_all`].

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;

use crate::cache::cache_key;
use crate::error::FetchError;

/// A batch of URIs to download into `cache_dir`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub cache_dir: PathBuf,
    pub uris: Vec<String>,
}

/// Populates the cache directory for every URI in a request.
///
/// On `Ok`, every URI must be readable from the cache under [`cache_key`].
pub trait Fetcher {
    fn fetch(&self, request: &FetchRequest) -> Result<(), FetchError>;
}

/// Runs an external helper command and waits for it
#[derive(Debug, Clone)]
pub struct ProcessFetcher {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessFetcher {
    /// Helper invoked as `program <args>... <cache_dir> <uri>...`
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add a leading argument, such as a subcommand name
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// The running executable's own `fetch` subcommand
    pub fn current_exe() -> Result<Self, FetchError> {
        let program = std::env::current_exe().map_err(FetchError::Spawn)?;
        Ok(Self::new(program).with_arg("fetch"))
    }
}

impl Fetcher for ProcessFetcher {
    fn fetch(&self, request: &FetchRequest) -> Result<(), FetchError> {
        log::info!(
            "fetching {} icon set(s) with {}",
            request.uris.len(),
            self.program.display()
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&request.cache_dir)
            .args(&request.uris)
            .output()
            .map_err(FetchError::Spawn)?;

        if !output.status.success() {
            return Err(FetchError::ProcessFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// Download every URI concurrently into `cache_dir`.
///
/// Each response must be HTTP 200; a failed download leaves no file behind.
/// All downloads run to completion and the first error is returned.
pub fn fetch_all(cache_dir: &Path, uris: &[String]) -> Result<(), FetchError> {
    fs::create_dir_all(cache_dir)?;

    let client = reqwest::blocking::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(concat!("iconify-css/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| FetchError::Http {
            uri: String::new(),
            message: e.to_string(),
        })?;

    let results: Vec<Result<(), FetchError>> = thread::scope(|scope| {
        let handles: Vec<_> = uris
            .iter()
            .map(|uri| {
                let client = &client;
                scope.spawn(move || fetch_one(client, cache_dir, uri))
            })
            .collect();

        handles
            .into_iter()
            .zip(uris)
            .map(|(handle, uri)| {
                handle.join().unwrap_or_else(|_| {
                    Err(FetchError::Http {
                        uri: uri.clone(),
                        message: "download thread panicked".to_string(),
                    })
                })
            })
            .collect()
    });

    results.into_iter().collect()
}

fn fetch_one(
    client: &reqwest::blocking::Client,
    cache_dir: &Path,
    uri: &str,
) -> Result<(), FetchError> {
    let http_error = |message: String| FetchError::Http {
        uri: uri.to_string(),
        message,
    };

    let response = client.get(uri).send().map_err(|e| http_error(e.to_string()))?;

    if response.status() != reqwest::StatusCode::OK {
        return Err(http_error(format!("HTTP status: {}", response.status())));
    }

    let body = response.bytes().map_err(|e| http_error(e.to_string()))?;

    let path = cache_dir.join(cache_key(uri));
    if let Err(e) = fs::write(&path, &body) {
        let _ = fs::remove_file(&path);
        return Err(e.into());
    }

    log::debug!("fetched {uri} into {}", path.display());
    Ok(())
}
