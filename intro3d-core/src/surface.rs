//! The drawable surface the host window provides.

/// A window-like surface whose backing store can be sized independently of its
/// on-screen size.
pub trait Surface {
    /// On-screen size in logical units.
    fn display_size(&self) -> (u32, u32);

    /// Device pixels per logical unit, horizontally and vertically.
    fn pixel_ratio(&self) -> (f32, f32);

    /// Current size of the backing store in device pixels.
    fn drawable_size(&self) -> (u32, u32);

    fn set_drawable_size(&mut self, width: u32, height: u32);
}

/// Resizes the backing store to `display_size * pixel_ratio` and returns the size it
/// actually ended up with.
///
/// Nothing is changed when the surface already has that size. A host that manages its own
/// backing store may ignore the request, so the caller always gets the real drawable size.
pub fn fit_to_display<S: Surface + ?Sized>(surface: &mut S) -> (u32, u32) {
    let (width, height) = surface.display_size();
    let (ratio_x, ratio_y) = surface.pixel_ratio();
    let target = (
        (width as f32 * ratio_x).round() as u32,
        (height as f32 * ratio_y).round() as u32,
    );

    if surface.drawable_size() != target {
        log::debug!(
            "Resizing drawable from {:?} to {target:?}",
            surface.drawable_size()
        );
        surface.set_drawable_size(target.0, target.1);
    }
    surface.drawable_size()
}


#[cfg(test)]
mod tests {
    use super::{fake::FakeSurface, *};

    #[test]
    fn scales_by_pixel_ratio() {
        let mut surface = FakeSurface::new(640, 480, 2.0);
        assert_eq!(fit_to_display(&mut surface), (1280, 960));
        assert_eq!(surface.drawable, (1280, 960));
    }

    #[test]
    fn second_fit_is_a_no_op() {
        let mut surface = FakeSurface::new(800, 600, 1.5);
        let first = fit_to_display(&mut surface);
        let second = fit_to_display(&mut surface);
        assert_eq!(first, second);
        assert_eq!(surface.resizes, 1);
    }

    #[test]
    fn follows_display_changes() {
        let mut surface = FakeSurface::new(800, 600, 1.0);
        fit_to_display(&mut surface);
        surface.display = (1024, 768);
        assert_eq!(fit_to_display(&mut surface), (1024, 768));
        assert_eq!(surface.resizes, 2);
    }

    #[test]
    fn ratio_is_applied_per_axis() {
        let mut surface = FakeSurface::new(640, 480, 1.0);
        surface.ratio = (2.0, 1.5);
        assert_eq!(fit_to_display(&mut surface), (1280, 720));
    }

    #[test]
    fn reports_the_real_drawable_when_the_host_keeps_its_size() {
        let mut surface = FakeSurface::new(640, 360, 2.0);
        surface.drawable = (1279, 721);
        surface.fixed = true;
        assert_eq!(fit_to_display(&mut surface), (1279, 721));
    }
}
