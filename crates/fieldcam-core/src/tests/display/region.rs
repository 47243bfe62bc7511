use crate::DirtyRegion;

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};

/// WHAT: Union covers both regions and ignores empty ones
/// WHY: The push hint must include every changed pixel and nothing spurious
#[test]
fn given_disjoint_regions_when_unioned_then_bounding_box_returned() {
    // Given: Two disjoint regions and an empty one
    let status = DirtyRegion::new(0, 0, 250, 20);
    let bar = DirtyRegion::new(10, 75, 230, 11);
    let empty = DirtyRegion::new(100, 100, 0, 5);

    // When: Taking the union
    let all = status.union(empty).union(bar);

    // Then: The box spans from the header to the bar
    assert_eq!(all, DirtyRegion::new(0, 0, 250, 86));
    assert!(all.contains(&status));
    assert!(all.contains(&bar));
}

/// WHAT: Bounding of nothing is None
/// WHY: A tick that draws nothing carries no region hint
#[test]
fn given_no_regions_when_bounding_then_none() {
    // Given / When
    let bounds = DirtyRegion::bounding(std::iter::empty());

    // Then
    assert_eq!(bounds, None);
}

/// WHAT: Conversion from a rectangle clips negative origins
/// WHY: Display coordinates are unsigned
#[test]
fn given_rectangle_left_of_origin_when_converted_then_clipped() {
    // Given: A rectangle starting at (-3, 2)
    let rect = Rectangle::new(Point::new(-3, 2), Size::new(10, 4));

    // When
    let region = DirtyRegion::from(rect);

    // Then: The hidden 3 columns are cut off
    assert_eq!(region, DirtyRegion::new(0, 2, 7, 4));
    assert_eq!(region.to_rectangle(), Rectangle::new(Point::new(0, 2), Size::new(7, 4)));
}
