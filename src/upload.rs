use actix_multipart::form::tempfile::TempFile;
use actix_web::HttpRequest;
use rand::Rng;
use std::fs;
use std::io;
use std::path::Path;

/// Millisecond timestamp plus a random suffix keeps concurrent uploads
/// from clobbering each other. Extension is fixed to .jpg whatever the
/// client actually sent.
pub fn unique_selfie_name() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{millis}-{suffix}.jpg")
}

/// Copy the streamed temp file into the upload directory and return the
/// generated filename. Files accumulate indefinitely; there is no
/// retention policy.
pub fn store_selfie(selfie: &TempFile, dir: &str) -> io::Result<String> {
    let name = unique_selfie_name();
    fs::create_dir_all(dir)?;
    fs::copy(selfie.file.path(), Path::new(dir).join(&name))?;
    Ok(name)
}

/// Publicly fetchable URL for a stored selfie, built from the request's
/// scheme and host plus the static-serving prefix.
pub fn public_url(req: &HttpRequest, name: &str) -> String {
    let info = req.connection_info();
    format!("{}://{}/uploads/{}", info.scheme(), info.host(), name)
}
