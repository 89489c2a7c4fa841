use super::*;
use crate::foundation::error::OverlayError;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_stream").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn dash_selects_standard_streams() {
    assert_eq!(InputSource::from_arg("-"), InputSource::Stdin);
    assert_eq!(OutputTarget::from_arg("-"), OutputTarget::Stdout);
    assert_eq!(
        InputSource::from_arg("in.png"),
        InputSource::File(PathBuf::from("in.png"))
    );
    assert_eq!(OutputTarget::Stdout.path(), None);
}

#[test]
fn stdout_uses_requested_format() {
    assert_eq!(
        OutputTarget::Stdout.resolve_format(Format::Gif).unwrap(),
        Format::Gif
    );
}

#[test]
fn file_extension_wins_over_requested_format() {
    let target = OutputTarget::from_arg("out.bmp");
    assert_eq!(target.resolve_format(Format::Png).unwrap(), Format::Bmp);
    assert_eq!(target.resolve_format(Format::Jpeg).unwrap(), Format::Bmp);
}

#[test]
fn unsupported_extension_fails_even_with_a_valid_flag() {
    let err = OutputTarget::from_arg("out.webp")
        .resolve_format(Format::Png)
        .unwrap_err();
    assert!(matches!(err, OverlayError::Config(_)));
}

#[test]
fn file_roundtrip_through_streams() {
    let dir = scratch_dir("roundtrip");
    let path = dir.join("bytes.bin");
    let target = OutputTarget::File(path.clone());
    target.write_all(b"abc").unwrap();

    let source = InputSource::File(path);
    assert_eq!(source.read_all().unwrap(), b"abc");
}

#[test]
fn missing_input_file_names_the_path() {
    let err = InputSource::from_arg("target/does/not/exist.png")
        .read_all()
        .unwrap_err();
    let msg = format!("{:#}", anyhow::Error::new(err));
    assert!(msg.contains("target/does/not/exist.png"), "{msg}");
}
