/// Generates a constant-value image.
pub fn flat_u8(width: usize, height: usize, value: u8) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    vec![value; width * height]
}

/// Generates a black image with one bright column.
pub fn column_impulse_u8(width: usize, height: usize, column: usize, value: u8) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(column < width, "impulse column must be inside the image");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        img[y * width + column] = value;
    }
    img
}

/// Generates a vertical step: columns left of `split` are `low_value`,
/// the rest are `high_value`.
pub fn vertical_step_u8(
    width: usize,
    height: usize,
    split: usize,
    low_value: u8,
    high_value: u8,
) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(split <= width, "split column must be inside the image");

    let mut img = vec![low_value; width * height];
    for y in 0..height {
        for x in split..width {
            img[y * width + x] = high_value;
        }
    }
    img
}
