use crate::game::Game;

/// Opaque handle to an image the frontend has loaded.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImageAsset {
    Player,
    Invader,
}

/// Drawing operations the renderer needs, in surface (device pixel) units.
pub trait DrawSurface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn draw_image(&mut self, image: ImageAsset, x: f64, y: f64, width: f64, height: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: f64);
}

/// Draw one frame: score, ship, shots and invaders. Logical coordinates are
/// multiplied by the playfield scale before every call.
pub fn render(game: &Game, surface: &mut impl DrawSurface) {
    let playfield = game.playfield();
    let config = game.config();
    let s = |v: f64| playfield.to_surface(v);

    surface.clear(s(playfield.width), s(playfield.height));
    surface.fill_text(&game.score().to_string(), s(15.0), s(25.0), 100.0);

    let size = config.player_size;
    surface.draw_image(
        ImageAsset::Player,
        s(game.player().x - size / 2.0),
        s(playfield.height - size),
        s(size),
        s(size),
    );

    let (pw, ph) = (config.projectile_width, config.projectile_height);
    for projectile in game.projectiles() {
        surface.fill_rect(
            s(projectile.x - pw / 2.0),
            s(projectile.y - ph / 2.0),
            s(pw),
            s(ph),
        );
    }

    let size = config.invader_size;
    for invader in game.invaders() {
        surface.draw_image(
            ImageAsset::Invader,
            s(invader.x - size / 2.0),
            s(invader.y - size / 2.0),
            s(size),
            s(size * config.invader_render_height_ratio),
        );
    }
}
