//! Link classification for discovered URLs
//!
//! Decides whether a hyperlink target is a page worth crawling or a file to
//! skip. Classification is by path extension plus the anchor's `download`
//! attribute; an unrecognized extension is treated as a file so unknown binary
//! formats are never fetched and parsed as HTML.

use url::Url;

/// Verdict for a discovered link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    /// A crawlable page
    Page,

    /// A file to skip, with the extension (or `"download"` for forced downloads)
    File {
        /// Lowercased extension without the leading dot
        extension: String,
    },
}

/// Extensions that are served as pages despite having an extension
const PAGE_EXTENSIONS: &[&str] = &[
    "html", "htm", "php", "asp", "aspx", "jsp", "shtml", "xhtml", "jhtml", "cfm", "cgi", "do",
    "action", "pl", "py", "rb",
];

/// Extensions known to be downloadable files rather than pages
const FILE_EXTENSIONS: &[&str] = &[
    // documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "csv", "rtf", "odt", "ods", "odp",
    // archives
    "zip", "tar", "gz", "rar", "7z", "bz2", "tgz", "xz", "z",
    // images
    "jpg", "jpeg", "png", "gif", "svg", "webp", "bmp", "ico", "tiff", "tif", "heic", "heif",
    // audio
    "mp3", "wav", "ogg", "m4a", "flac", "aac", "wma",
    // video
    "mp4", "avi", "mov", "webm", "flv", "wmv", "mkv", "m4v", "mpg", "mpeg", "3gp",
    // data and config
    "json", "xml", "sql", "yaml", "yml", "toml", "ini", "conf",
    // executables and installers
    "exe", "dmg", "pkg", "deb", "rpm", "msi", "app",
    // scripts served as downloads
    "sh", "bat", "cmd", "ps1",
    // fonts
    "ttf", "otf", "woff", "woff2", "eot",
    // misc binary
    "iso", "bin", "dat", "db", "log",
];

/// Classify a link target as a page or a file
///
/// `has_download_attr` reflects the anchor element's `download` attribute,
/// which forces a file verdict regardless of extension. Total over any input
/// string: a URL that fails to parse is classified by its final path segment.
pub fn classify_link(url: &str, has_download_attr: bool) -> LinkKind {
    if has_download_attr {
        return LinkKind::File {
            extension: "download".to_string(),
        };
    }

    let extension = match path_extension(url) {
        Some(ext) => ext,
        None => return LinkKind::Page,
    };

    if PAGE_EXTENSIONS.contains(&extension.as_str()) {
        return LinkKind::Page;
    }

    // Known file types and anything unrecognized are both skipped; an unknown
    // extension must not be mistaken for a crawlable page.
    LinkKind::File { extension }
}

/// Extract the lowercased extension from a URL's path component
fn path_extension(url: &str) -> Option<String> {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // relative or malformed links carry no scheme; strip query and
        // fragment by hand and classify what remains
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let segment = path.rsplit('/').next().unwrap_or_default();
    let (stem, extension) = segment.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_lowercase())
}
