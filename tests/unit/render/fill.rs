use super::*;

#[test]
fn new_canvas_is_uniform() {
    let canvas = new_canvas(Size::new(3, 2), Colour::rgba(10, 20, 30, 255)).unwrap();
    assert_eq!(canvas.size(), Size::new(3, 2));
    for px in canvas.as_premul_rgba8().chunks_exact(4) {
        assert_eq!(px, [10, 20, 30, 255]);
    }
}

#[test]
fn new_canvas_keeps_translucent_colour() {
    let canvas = new_canvas(Size::new(1, 1), Colour::rgba(255, 255, 255, 0)).unwrap();
    assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn src_fill_replaces_alpha() {
    let mut canvas = new_canvas(Size::new(2, 1), Colour::WHITE).unwrap();
    fill_rect(
        &mut canvas,
        Point::ORIGIN,
        Size::new(1, 1),
        Colour::rgba(0, 0, 0, 0),
        FillMode::Src,
    );
    assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(canvas.pixel(1, 0), Some([255, 255, 255, 255]));
}

#[test]
fn over_fill_blends_translucent_colour() {
    let mut canvas = new_canvas(Size::new(1, 1), Colour::rgba(0, 0, 255, 255)).unwrap();
    fill_rect(
        &mut canvas,
        Point::ORIGIN,
        Size::new(1, 1),
        Colour::rgba(255, 0, 0, 128),
        FillMode::Over,
    );
    assert_eq!(canvas.pixel(0, 0), Some([128, 0, 127, 255]));
}

#[test]
fn fill_is_clipped_to_canvas() {
    let mut canvas = new_canvas(Size::new(4, 4), Colour::WHITE).unwrap();
    fill_rect(
        &mut canvas,
        Point::new(2, -1),
        Size::new(10, 2),
        Colour::BLACK,
        FillMode::Src,
    );
    assert_eq!(canvas.pixel(2, 0), Some([0, 0, 0, 255]));
    assert_eq!(canvas.pixel(3, 0), Some([0, 0, 0, 255]));
    assert_eq!(canvas.pixel(1, 0), Some([255, 255, 255, 255]));
    assert_eq!(canvas.pixel(2, 1), Some([255, 255, 255, 255]));
}
