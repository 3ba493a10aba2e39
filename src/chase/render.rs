use super::sim::World;

/// 2D drawing target. Implemented over a canvas context in the browser and
/// by recorders in tests.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, size: f64, color: &str);
    /// Draw the pursuer sprite scaled to `size`. Returns false if the image
    /// is not usable yet so the caller can fall back to a solid square.
    fn draw_sprite(&mut self, x: f64, y: f64, size: f64) -> bool;
}

pub fn render(world: &World, surface: &mut dyn Surface) {
    let p = &world.player;
    surface.fill_rect(p.x, p.y, p.size, &p.color);
    let g = &world.pursuer;
    if !surface.draw_sprite(g.x, g.y, g.size) {
        surface.fill_rect(g.x, g.y, g.size, &g.color);
    }
}
