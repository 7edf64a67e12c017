//! Display collaborator interface
//!
//! The drill never touches the page directly. It hands image locators and HUD text
//! to a [`DisplaySurface`], which the browser binding implements on top of the DOM.

/// Where notes and status text end up.
pub trait DisplaySurface {
    /// Preload the image at `locator` and show it once loaded.
    ///
    /// Loads are not cancelled: if several are in flight, whichever finishes last is
    /// what stays on screen. A load that never completes never replaces the image.
    fn show_image(&mut self, locator: &str);

    /// Show a status/HUD message.
    fn show_status(&mut self, text: &str);

    /// Enable or disable the range, preset and toggle controls.
    fn set_controls_enabled(&mut self, enabled: bool);
}
