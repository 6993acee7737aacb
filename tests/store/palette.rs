use splat_edit::{Error, TransformPalette, glam::*};

#[test]
fn test_transform_palette_new_should_hold_identity() {
    let palette = TransformPalette::new();

    assert_eq!(palette.len(), 1);
    assert_eq!(palette.get(0), Some(Mat4::IDENTITY));
    assert_eq!(palette.last(), Mat4::IDENTITY);
}

#[test]
fn test_transform_palette_when_set_should_store_transposed() {
    let mut palette = TransformPalette::new();
    let transform = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));

    let index = palette.add_transform(transform).expect("palette slot");

    assert_eq!(index, 1);
    assert_eq!(palette.get(index), Some(transform));
    assert_eq!(palette.raw()[1], transform.transpose());
    assert_eq!(palette.as_bytes().len(), 2 * std::mem::size_of::<Mat4>());
    assert_eq!(palette.last(), transform);
}

#[test]
fn test_transform_palette_set_when_out_of_range_should_leave_palette_untouched() {
    let mut palette = TransformPalette::new();

    palette.set(7, Mat4::ZERO);

    assert_eq!(palette.len(), 1);
    assert_eq!(palette.get(7), None);
}

#[test]
fn test_transform_palette_when_full_should_return_palette_full() {
    let mut palette = TransformPalette::new();
    while palette.len() < TransformPalette::CAPACITY {
        palette.add_transform(Mat4::IDENTITY).expect("palette slot");
    }

    assert!(matches!(
        palette.add_transform(Mat4::IDENTITY),
        Err(Error::PaletteFull { .. })
    ));
    assert_eq!(palette.len(), TransformPalette::CAPACITY);
}
