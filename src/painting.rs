/*
 * Label rendering, kept free of GDI so the paint path is unit-testable.
 * The window procedure hands the renderer a `Surface` (on Windows, a thin
 * wrapper over the `BeginPaint` device context) together with the owning
 * window's label list; every label is drawn on every paint pass.
 */

use crate::types::Label;

/// Drawing operations the renderer needs from a paint target.
pub(crate) trait Surface {
    /// Draws `text` anchored at client coordinates (`x`, `y`).
    fn draw_text(&mut self, text: &str, x: i32, y: i32);
}

/// Draws all `labels` in list order onto `surface`.
pub(crate) fn render_labels(labels: &[Label], surface: &mut dyn Surface) {
    for label in labels {
        surface.draw_text(&label.text, label.x, label.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /*
     * A surface that records draw calls so tests can assert on exactly what
     * a paint pass would put on screen, without any device context.
     */
    #[derive(Default)]
    struct RecordingSurface {
        draws: Vec<(String, i32, i32)>,
    }

    impl Surface for RecordingSurface {
        fn draw_text(&mut self, text: &str, x: i32, y: i32) {
            self.draws.push((text.to_string(), x, y));
        }
    }

    fn label(text: &str, x: i32, y: i32) -> Label {
        Label {
            text: text.to_string(),
            x,
            y,
        }
    }

    #[test]
    fn renders_labels_in_list_order_at_their_anchors() {
        // Arrange
        let labels = vec![label("Hello", 5, 5), label("World", 5, 40)];
        let mut surface = RecordingSurface::default();
        // Act
        render_labels(&labels, &mut surface);
        // Assert
        assert_eq!(
            surface.draws,
            vec![
                ("Hello".to_string(), 5, 5),
                ("World".to_string(), 5, 40),
            ]
        );
    }

    #[test]
    fn empty_label_list_draws_nothing() {
        let mut surface = RecordingSurface::default();
        render_labels(&[], &mut surface);
        assert!(surface.draws.is_empty());
    }
}
