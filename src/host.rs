//! Host capability: addressing and page title.
//!
//! The host supplies locations (see [`crate::session`]) and receives two
//! kinds of commands from the coordinator: redirects and title updates.

/// Commands the coordinator issues to its host.
pub trait Host: Send + Sync + 'static {
    /// Redirect to the concrete address of `id`.
    ///
    /// Implementations must turn this into a new navigation event.
    fn go_to(&self, id: &str);

    /// Update the page title after a successful load.
    fn set_title(&self, title: &str);
}

#[cfg(test)]
pub(crate) use recording::RecordingHost;
