/// Host window metrics as reported by the frontend.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }
}

/// Logical game area. Every entity position is expressed in these units;
/// `scale` maps them onto the backing drawing surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

impl Playfield {
    pub fn from_viewport(viewport: Viewport, fraction: f64) -> Self {
        let scale = if viewport.device_pixel_ratio > 0.0 {
            viewport.device_pixel_ratio
        } else {
            1.0
        };
        Self {
            width: viewport.width * fraction,
            height: viewport.height * fraction,
            scale,
        }
    }

    #[inline]
    pub fn to_surface(&self, value: f64) -> f64 {
        value * self.scale
    }

    /// Backing surface width in device pixels.
    pub fn surface_width(&self) -> u32 {
        self.to_surface(self.width).max(0.0) as u32
    }

    pub fn surface_height(&self) -> u32 {
        self.to_surface(self.height).max(0.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playfield_takes_a_fraction_of_the_viewport() {
        let pf = Playfield::from_viewport(Viewport::new(1000.0, 800.0, 2.0), 0.9);
        assert_eq!(pf.width, 900.0);
        assert_eq!(pf.height, 720.0);
        assert_eq!(pf.scale, 2.0);
        assert_eq!(pf.surface_width(), 1800);
        assert_eq!(pf.surface_height(), 1440);
    }

    #[test]
    fn missing_pixel_ratio_falls_back_to_one() {
        let pf = Playfield::from_viewport(Viewport::new(100.0, 100.0, 0.0), 1.0);
        assert_eq!(pf.scale, 1.0);
        assert_eq!(pf.to_surface(15.0), 15.0);
    }
}
