//! Filing archive reader.
//!
//! EDINET delivers each filing as a ZIP whose `XBRL/PublicDoc/` subtree
//! holds the publicly disclosed document set. Only that subtree is of
//! interest here; audit attachments and the private `AuditDoc` tree are
//! skipped.

use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::core::models::ArchiveMember;

const XBRL_EXTENSIONS: &[&str] = &[".xbrl", ".htm", ".html"];

/// Extract the decoded `PublicDoc` XBRL/HTML members from a filing ZIP.
///
/// A corrupt archive yields an empty list rather than an error: callers
/// treat "no readable XBRL" the same as "no filing found". Members that
/// are not valid UTF-8 are skipped.
pub fn find_xbrl_files(zip_bytes: &[u8]) -> Vec<ArchiveMember> {
    let Ok(mut archive) = ZipArchive::new(Cursor::new(zip_bytes)) else {
        return Vec::new();
    };

    let mut members = Vec::new();
    for i in 0..archive.len() {
        let Ok(mut file) = archive.by_index(i) else {
            continue;
        };
        let name = file.name().to_string();
        if !is_public_doc(&name) {
            continue;
        }
        let mut content = String::new();
        if file.read_to_string(&mut content).is_ok() {
            members.push(ArchiveMember { name, content });
        }
    }
    members
}

fn is_public_doc(path: &str) -> bool {
    let normalized = path.to_lowercase().replace(['\\', '_', '-'], "");
    normalized.contains("publicdoc")
        && XBRL_EXTENSIONS.iter().any(|ext| normalized.ends_with(ext))
}
