//! Driver-station status line.
//!
//! The control loop reports one short line at a time ("Image captured!",
//! vision errors). [`LcdConsole`] draws it on any `embedded-graphics` target;
//! [`Screen`] turns a device that can only fill rectangles, such as the V5
//! Brain screen, into such a target.

use core::{convert::Infallible, fmt::Debug};

use embedded_graphics::{
    Drawable, Pixel,
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::{Rgb565, Rgb888, RgbColor},
    prelude::{Dimensions, DrawTarget, OriginDimensions, Point, Primitive, Size},
    primitives::{ContainsPoint, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use log::warn;

/// Something that shows a single status line.
pub trait StatusDisplay {
    /// Replaces the current status line with `text`.
    fn show(&mut self, text: &str);
}

impl<T: StatusDisplay + ?Sized> StatusDisplay for Box<T> {
    fn show(&mut self, text: &str) { (**self).show(text) }
}

/// Height of one text row in pixels.
pub const LINE_HEIGHT: u32 = 10;

/// Draws the status line on a color screen.
#[derive(Debug)]
pub struct LcdConsole<D> {
    target: D,
    line:   u32,
}

impl<D> LcdConsole<D>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: Debug,
{
    /// A console that draws on text row `line` of `target`.
    pub fn new(target: D, line: u32) -> Self { Self { target, line } }

    pub fn target(&self) -> &D { &self.target }

    fn row(&self) -> Rectangle {
        let width = self.target.bounding_box().size.width;
        Rectangle::new(
            Point::new(0, (self.line * LINE_HEIGHT) as i32),
            Size::new(width, LINE_HEIGHT),
        )
    }

    fn draw(&mut self, text: &str) -> Result<(), D::Error> {
        let row = self.row();
        row.into_styled(PrimitiveStyle::with_fill(Rgb565::BLACK))
            .draw(&mut self.target)?;
        Text::with_baseline(
            text,
            row.top_left,
            MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE),
            Baseline::Top,
        )
        .draw(&mut self.target)?;
        Ok(())
    }
}

impl<D> StatusDisplay for LcdConsole<D>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: Debug,
{
    fn show(&mut self, text: &str) {
        self.draw(text)
            .unwrap_or_else(|e| warn!("Status line draw failed: {:?}", e));
    }
}

/// A color screen that can only fill rectangles.
pub trait ScreenSurface {
    fn size(&self) -> Size;

    /// Fills `area`, which always lies inside the screen and is never empty.
    fn fill_rect(&mut self, area: Rectangle, color: Rgb888);
}

/// Draws on a [`ScreenSurface`] through `embedded-graphics`.
///
/// Pixels outside the screen are dropped. Solid fills reach the surface as
/// one rectangle.
#[derive(Debug)]
pub struct Screen<S> {
    surface: S,
}

impl<S: ScreenSurface> Screen<S> {
    pub fn new(surface: S) -> Self { Self { surface } }

    pub fn surface(&self) -> &S { &self.surface }
}

impl<S: ScreenSurface> OriginDimensions for Screen<S> {
    fn size(&self) -> Size { self.surface.size() }
}

impl<S: ScreenSurface> DrawTarget for Screen<S> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if bounds.contains(point) {
                self.surface
                    .fill_rect(Rectangle::new(point, Size::new(1, 1)), color.into());
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if !area.is_zero_sized() {
            self.surface.fill_rect(area, color.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;

    fn lit(display: &MockDisplay<Rgb565>, rows: core::ops::Range<i32>) -> usize {
        rows.flat_map(|y| (0..64).map(move |x| Point::new(x, y)))
            .filter(|&p| display.get_pixel(p) == Some(Rgb565::WHITE))
            .count()
    }

    fn console(line: u32) -> LcdConsole<MockDisplay<Rgb565>> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        LcdConsole::new(display, line)
    }

    #[test]
    fn draws_text_on_its_row() {
        let mut console = console(1);
        console.show("OK");
        assert!(lit(console.target(), 10..20) > 0);
        assert_eq!(lit(console.target(), 0..10), 0);
    }

    /// Records every rectangle it is asked to fill.
    struct RecordingSurface {
        size:  Size,
        fills: Vec<(Rectangle, Rgb888)>,
    }

    impl ScreenSurface for RecordingSurface {
        fn size(&self) -> Size { self.size }

        fn fill_rect(&mut self, area: Rectangle, color: Rgb888) { self.fills.push((area, color)); }
    }

    fn brain_console(line: u32) -> LcdConsole<Screen<RecordingSurface>> {
        let surface = RecordingSurface {
            size:  Size::new(48, 40),
            fills: Vec::new(),
        };
        LcdConsole::new(Screen::new(surface), line)
    }

    #[test]
    fn screen_clears_the_row_in_one_fill() {
        let mut console = brain_console(2);
        console.show("Camera: timed out");

        let fills = &console.target().surface().fills;
        assert_eq!(
            fills.first(),
            Some(&(Rectangle::new(Point::new(0, 20), Size::new(48, 10)), Rgb888::BLACK))
        );
        assert!(fills.iter().skip(1).any(|&(_, color)| color == Rgb888::WHITE));
    }

    #[test]
    fn screen_drops_text_past_its_edge() {
        let mut console = brain_console(0);
        console.show("a line far wider than the screen");

        let screen = console.target().bounding_box();
        for (area, _) in &console.target().surface().fills {
            assert!(screen.contains(area.top_left));
            assert!(area.bottom_right().is_some_and(|corner| screen.contains(corner)));
        }
    }

    #[test]
    fn new_text_replaces_the_old_line() {
        let mut console = console(0);
        console.show("Image captured!");
        assert!(lit(console.target(), 0..10) > 0);
        console.show("");
        assert_eq!(lit(console.target(), 0..10), 0);
    }
}
