//! Pure calculation functions for image dimensions.
//!
//! Nothing here touches the filesystem or decodes pixels.

/// Apply the max-width resize policy.
///
/// Images no wider than `max_width` keep their dimensions. Wider images are
/// scaled so their width becomes exactly `max_width`, with the height scaled
/// by the same ratio and rounded to the nearest pixel (never below 1).
///
/// # Examples
/// ```
/// # use compress_images::imaging::fit_to_max_width;
/// assert_eq!(fit_to_max_width((2000, 1000), 1400), (1400, 700));
/// assert_eq!(fit_to_max_width((300, 300), 1400), (300, 300));
/// ```
pub fn fit_to_max_width(original: (u32, u32), max_width: u32) -> (u32, u32) {
    let (w, h) = original;
    if w <= max_width {
        return (w, h);
    }

    let ratio = max_width as f64 / w as f64;
    let new_h = (h as f64 * ratio).round().max(1.0) as u32;
    (max_width, new_h)
}
