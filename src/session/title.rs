use std::sync::Arc;
use tokio::sync::watch;

/// The shared, display-only page title. Last write wins.
#[derive(Clone)]
pub struct PageTitle {
    tx: Arc<watch::Sender<String>>,
}

impl PageTitle {
    pub fn new(initial: &str) -> Self {
        let (tx, _) = watch::channel(initial.to_string());
        Self { tx: Arc::new(tx) }
    }

    pub fn set(&self, title: &str) {
        self.tx.send_replace(title.to_string());
    }

    pub fn current(&self) -> String {
        self.tx.borrow().clone()
    }

    /// Receiver that wakes whenever a page sets a new title.
    ///
    /// ```
    /// use care_console::session::PageTitle;
    ///
    /// # tokio_test::block_on(async {
    /// let title = PageTitle::new("Dashboard");
    /// let mut header = title.subscribe();
    ///
    /// title.set("Caregivers");
    /// header.changed().await.unwrap();
    /// assert_eq!(*header.borrow(), "Caregivers");
    /// # });
    /// ```
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }
}

impl Default for PageTitle {
    fn default() -> Self {
        Self::new("Dashboard")
    }
}
