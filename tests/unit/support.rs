use std::{os::unix::fs::PermissionsExt as _, path::PathBuf, process::Command, time::Duration};

/// Executable `sh` script standing in for `ffmpeg`; `-version` always succeeds, any other
/// invocation runs `body`.
pub(crate) fn fake_ffmpeg(name: &str, body: &str) -> PathBuf {
    let dir = std::env::current_dir()
        .unwrap()
        .join("target")
        .join("slidecast-unit")
        .join("fake-ffmpeg");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let script = format!("#!/bin/sh\nif [ \"$1\" = \"-version\" ]; then exit 0; fi\n{body}\n");
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

    // A fork on another test thread can hold the fresh file open for a moment (ETXTBSY).
    for _ in 0..100 {
        let ok = Command::new(&path)
            .arg("-version")
            .status()
            .map(|s| s.success())
            .unwrap_or(false);
        if ok {
            return path;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    panic!("fake ffmpeg '{}' never became runnable", path.display());
}

/// Writes ~220 KB of noise to stderr before reading stdin, then succeeds.
pub(crate) const CHATTY_FFMPEG: &str = r#"i=0
while [ $i -lt 4000 ]; do
  echo "[swscaler] warning: padding padding padding padding $i" >&2
  i=$((i+1))
done
cat > /dev/null
exit 0"#;

/// Fails straight away with a diagnostic on stderr, never reading stdin.
pub(crate) const FAILING_FFMPEG: &str = r#"echo "Unable to find a suitable output format" >&2
exit 1"#;
