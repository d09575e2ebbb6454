use crate::client::SlackClient;
use crate::error::{Error, Result};
use crate::pagination::{drain_pages, Page};
use crate::terminal::{get_formatted_left_output, OutputColor};
use derive_more::Display;
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RemoteFile {
    pub id: String,

    pub name: String,

    /// Extension as reported by the API, without the leading dot
    #[serde(default)]
    pub filetype: String,

    pub size: u64,

    /// Missing for files slack cannot serve, e.g. tombstoned uploads
    pub url_private_download: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RemoteFile {
    /// `<stem>-<id>.<ext>`, used when the primary name is taken by a file
    /// of a different size
    pub fn disambiguated_name(&self) -> String {
        let stem = self
            .name
            .strip_suffix(&format!(".{}", self.filetype))
            .filter(|_| !self.filetype.is_empty())
            .unwrap_or(&self.name);

        if self.filetype.is_empty() {
            format!("{stem}-{}", self.id)
        } else {
            format!("{stem}-{}.{}", self.id, self.filetype)
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy)]
pub struct Paging {
    pub page: u32,
    pub pages: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct FilesResponse {
    pub ok: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub files: Vec<RemoteFile>,
    pub paging: Option<Paging>,
}

pub async fn list_files(client: &SlackClient, pb: &ProgressBar) -> Result<Vec<RemoteFile>> {
    drain_pages(1u32, |page: u32| {
        if page > 1 {
            pb.set_message(format!(": files (page {page})"));
        }

        let request = files_page(client, page);
        async move {
            let response = request.await?;

            if !response.ok {
                return Err(Error::Api(
                    response
                        .error
                        .unwrap_or_else(|| "files.list failed".to_string()),
                ));
            }

            let paging = response
                .paging
                .ok_or_else(|| Error::Api("files.list response had no paging info".to_string()))?;

            Ok(Page {
                items: response.files,
                next: (paging.page != paging.pages).then_some(paging.page + 1),
            })
        }
    })
    .await
}

async fn files_page(client: &SlackClient, page: u32) -> Result<FilesResponse> {
    client
        .get_json(
            "files.list",
            &[
                ("count", "500".to_string()),
                ("show_files_hidden_by_limit", "true".to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SyncPlan {
    #[display(fmt = "already archived")]
    Skip,

    #[display(fmt = "fetching {}", "_0.display()")]
    Download(PathBuf),
}

/// Decides whether `file` still needs to be fetched. Identity is size-only:
/// a local file of the declared size at the resolved path counts as the
/// same content. A primary-path file of a different size is unrelated
/// content and routes the download to the disambiguated name instead.
pub fn plan_sync(files_dir: &Path, file: &RemoteFile) -> SyncPlan {
    let primary = files_dir.join(&file.name);

    match fs::metadata(&primary) {
        Ok(metadata) if metadata.len() == file.size => SyncPlan::Skip,
        Ok(_) => {
            let fallback = files_dir.join(file.disambiguated_name());

            match fs::metadata(&fallback) {
                Ok(metadata) if metadata.len() == file.size => SyncPlan::Skip,
                _ => SyncPlan::Download(fallback),
            }
        }
        Err(_) => SyncPlan::Download(primary),
    }
}

/// Downloads every file that has no identical local copy. Per-file
/// failures are reported and skipped; only the directory creation is fatal.
pub async fn sync_files(
    client: &SlackClient,
    files_dir: &Path,
    files: &[RemoteFile],
    pb: &ProgressBar,
) -> Result<()> {
    fs::create_dir_all(files_dir)
        .map_err(|e| Error::io("failed to create files directory", e))?;

    for file in files {
        pb.set_message(format!(": {}", file.name));

        let plan = plan_sync(files_dir, file);
        match &plan {
            SyncPlan::Skip => {
                pb.println(format!(
                    "{} {} ({plan})",
                    get_formatted_left_output("Skipped", &OutputColor::Yellow),
                    file.name
                ));
            }
            SyncPlan::Download(path) => {
                let renamed = (path.file_name() != Some(std::ffi::OsStr::new(&file.name)))
                    .then(|| format!(" -> {}", path.display()));

                match download_file(client, file, path).await {
                    Ok(()) => pb.println(format!(
                        "{} {}{}",
                        get_formatted_left_output("Downloaded", &OutputColor::Green),
                        file.name,
                        renamed.unwrap_or_default()
                    )),
                    Err(e) => pb.println(format!(
                        "{} {} ({e})",
                        get_formatted_left_output("Failed", &OutputColor::Red),
                        file.name
                    )),
                }
            }
        }

        pb.inc(1);
    }

    Ok(())
}

async fn download_file(client: &SlackClient, file: &RemoteFile, path: &Path) -> Result<()> {
    let url = file
        .url_private_download
        .as_ref()
        .ok_or_else(|| Error::Api("no download url".to_string()))?;

    let mut dest = File::create(path)
        .map_err(|e| Error::io(format!("failed to create {}", path.display()), e))?;

    client.download(url, &mut dest).await
}
