use std::path::PathBuf;

/// Fresh path under the OS temp dir; the file itself is not created.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("vocab-gacha-{}-{}", uuid::Uuid::new_v4(), name))
}

pub fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = temp_path(name);
    std::fs::write(&path, contents).unwrap();
    path
}
