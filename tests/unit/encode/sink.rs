use super::*;

fn pixel() -> Raster {
    Raster::from_rgba8(1, 1, vec![255, 255, 255, 255]).unwrap()
}

#[test]
fn asset_names_are_deterministic() {
    assert_eq!(AssetName::Static.relative_path("title"), "title.png");
    assert_eq!(
        AssetName::Frame(7).relative_path("title"),
        "title_frames/frame_0007.png"
    );
    assert_eq!(
        AssetName::Mask(12).relative_path("ink"),
        "ink_masks/mask_0012.png"
    );
    assert_eq!(AssetName::Hq.relative_path("ink"), "ink_hq.png");
    assert_eq!(
        AssetName::Frame(12345).relative_path("x"),
        "x_frames/frame_12345.png"
    );
}

#[test]
fn in_memory_sink_returns_png_bytes() {
    let mut sink = InMemorySink::new();
    let r = sink.store("a", AssetName::Static, &pixel()).unwrap();
    assert!(r.as_bytes().unwrap().starts_with(b"\x89PNG"));
    assert!(r.as_path().is_none());
    assert_eq!(sink.names(), ["a.png"]);
}

#[test]
fn directory_sink_writes_nested_files() {
    let root = PathBuf::from("target").join("unit_directory_sink");
    let _ = std::fs::remove_dir_all(&root);

    let mut sink = DirectorySink::new(&root);
    let r = sink.store("layer_0_1", AssetName::Frame(3), &pixel()).unwrap();
    let path = r.as_path().unwrap();
    assert_eq!(path, root.join("layer_0_1_frames/frame_0003.png"));
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn layer_id_safety() {
    for ok in ["layer_0_1", "title", "logo.v2", "ink-1"] {
        assert!(is_safe_layer_id(ok), "{ok}");
    }
    for bad in ["", "../x", "/tmp/x", "a/b", r"a\b", "C:x", "..", "a\0b"] {
        assert!(!is_safe_layer_id(bad), "{bad:?}");
    }
}

#[test]
fn directory_sink_refuses_ids_outside_root() {
    let root = PathBuf::from("target").join("unit_directory_sink_escape");
    let _ = std::fs::remove_dir_all(&root);

    let mut sink = DirectorySink::new(root.join("out"));
    for id in ["../escaped", "/tmp/layerframe_escaped"] {
        let err = sink.store(id, AssetName::Static, &pixel()).unwrap_err();
        assert!(matches!(err, LayerframeError::Validation(_)), "{err}");
    }
    assert!(!root.join("escaped.png").exists());
    assert!(!root.join("out").exists());
}

#[test]
fn raster_ref_serializes_tagged() {
    let v = serde_json::to_value(RasterRef::Path(PathBuf::from("a.png"))).unwrap();
    assert_eq!(v, serde_json::json!({"kind": "path", "value": "a.png"}));
}
