use std::cell::RefCell;

use super::*;
use crate::ThumbError;

/// Fake codec: "images" are just sizes, every call is logged.
#[derive(Default)]
struct Recording {
    log: RefCell<Vec<String>>,
}

impl Recording {
    fn push(&self, s: impl Into<String>) {
        self.log.borrow_mut().push(s.into());
    }

    fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl ImageCodec for Recording {
    type Image = (u32, u32);

    fn decode(&self, bytes: &[u8], role: ImageRole) -> ThumbResult<(u32, u32)> {
        self.push(format!("decode {role}"));
        match bytes {
            [w, h] => Ok((u32::from(*w), u32::from(*h))),
            _ => Err(ThumbError::decode(role, anyhow::anyhow!("bad fixture"))),
        }
    }

    fn dimensions(&self, img: &(u32, u32)) -> (u32, u32) {
        *img
    }

    fn blank(&self, width: u32, height: u32) -> (u32, u32) {
        self.push(format!("blank {width}x{height}"));
        (width, height)
    }

    fn crop(&self, _img: &(u32, u32), rect: Rect) -> (u32, u32) {
        self.push(format!("crop {rect}"));
        (rect.width() as u32, rect.height() as u32)
    }

    fn resize(&self, _img: &(u32, u32), width: u32, height: u32) -> (u32, u32) {
        self.push(format!("resize {width}x{height}"));
        (width, height)
    }

    fn paste(&self, _dst: &mut (u32, u32), src: &(u32, u32), x: i64, y: i64) {
        self.push(format!("paste {}x{} at {x},{y}", src.0, src.1));
    }

    fn alpha_composite(&self, dst: &mut (u32, u32), src: &(u32, u32)) -> ThumbResult<()> {
        assert_eq!(*dst, *src);
        self.push("composite");
        Ok(())
    }

    fn encode(&self, img: &(u32, u32)) -> ThumbResult<Vec<u8>> {
        self.push("encode");
        Ok(vec![img.0 as u8, img.1 as u8])
    }
}

#[test]
fn steps_run_in_documented_order() {
    let codec = Recording::default();
    let out = compose_with(
        &codec,
        &[200, 100],
        &[250, 250],
        Rect::new(10, 10, 60, 40),
        Rect::new(20, 30, 120, 90),
    )
    .unwrap();

    assert_eq!(out, vec![200, 100]);
    assert_eq!(
        codec.calls(),
        vec![
            "decode template",
            "decode frame",
            "blank 200x100",
            "crop (10, 10, 60, 40)",
            "resize 100x60",
            "paste 100x60 at 20,30",
            "composite",
            "encode",
        ]
    );
}

#[test]
fn template_decode_failure_stops_before_frame() {
    let codec = Recording::default();
    let err = compose_with(
        &codec,
        b"bad",
        &[1, 1],
        Rect::new(0, 0, 1, 1),
        Rect::new(0, 0, 1, 1),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ThumbError::Decode {
            role: ImageRole::Template,
            ..
        }
    ));
    assert_eq!(codec.calls(), vec!["decode template"]);
}

#[test]
fn frame_decode_failure_names_frame() {
    let codec = Recording::default();
    let err = compose_with(
        &codec,
        &[4, 4],
        b"bad",
        Rect::new(0, 0, 1, 1),
        Rect::new(0, 0, 1, 1),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ThumbError::Decode {
            role: ImageRole::Frame,
            ..
        }
    ));
}

#[test]
fn zero_width_crop_is_geometry_error_without_output() {
    let codec = Recording::default();
    let err = compose_with(
        &codec,
        &[200, 100],
        &[250, 250],
        Rect::new(100, 100, 100, 100),
        Rect::new(0, 0, 10, 10),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ThumbError::Geometry {
            role: RectRole::Crop,
            ..
        }
    ));
    assert!(!codec.calls().iter().any(|c| c == "encode"));
}

#[test]
fn inverted_location_is_geometry_error() {
    let codec = Recording::default();
    let err = compose_with(
        &codec,
        &[200, 100],
        &[250, 250],
        Rect::new(0, 0, 10, 10),
        Rect::new(50, 50, 40, 60),
    )
    .unwrap_err();
    match err {
        ThumbError::Geometry { role, rect, .. } => {
            assert_eq!(role, RectRole::Location);
            assert_eq!(rect, Rect::new(50, 50, 40, 60));
        }
        other => panic!("unexpected error: {other}"),
    }
}
