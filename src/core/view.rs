use crate::core::filter::filter_applications;
use crate::domain::model::{ApplicationStatus, ExperienceApplication, RowAction, StatusPatch};
use crate::domain::ports::{Notifier, RecordStore};
use crate::utils::error::{AdminError, Result};
use chrono::Utc;
use std::collections::HashMap;

/// Provider applications screen: the fetched collection, the current search
/// query and the approve / reject actions.
///
/// 狀態變更後一律重新抓取整份清單，不做本地樂觀更新。
pub struct ApplicationsView<S: RecordStore, N: Notifier> {
    store: S,
    notifier: N,
    applications: Vec<ExperienceApplication>,
    query: String,
    next_sequence: u64,
    last_mutation: HashMap<String, u64>,
}

impl<S: RecordStore, N: Notifier> ApplicationsView<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            applications: Vec::new(),
            query: String::new(),
            next_sequence: 0,
            last_mutation: HashMap::new(),
        }
    }

    /// 初次載入
    pub async fn mount(&mut self) -> Result<usize> {
        tracing::debug!("Mounting provider applications view");
        self.refresh().await
    }

    /// Replaces the local collection with the store's current contents.
    /// On failure the previous collection is kept.
    pub async fn refresh(&mut self) -> Result<usize> {
        match self.store.fetch_all_ordered().await {
            Ok(applications) => {
                tracing::debug!("Fetched {} experience applications", applications.len());
                self.applications = applications;
                Ok(self.applications.len())
            }
            Err(e) => {
                tracing::debug!("Error fetching applications: {}", e);
                self.notifier.error("Failed to load applications");
                Err(e)
            }
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn applications(&self) -> &[ExperienceApplication] {
        &self.applications
    }

    /// Rows matching the current query, recomputed on every call.
    pub fn visible(&self) -> Vec<&ExperienceApplication> {
        filter_applications(&self.applications, &self.query)
    }

    pub fn find(&self, id: &str) -> Option<&ExperienceApplication> {
        self.applications.iter().find(|app| app.id == id)
    }

    pub fn actions_for(&self, id: &str) -> Vec<RowAction> {
        self.find(id).map(RowAction::available_for).unwrap_or_default()
    }

    /// Approve / Reject are only offered for records that are not yet featured.
    pub fn ensure_action(&self, id: &str, action: RowAction) -> Result<()> {
        if self.find(id).is_none() {
            return Err(AdminError::NotFound { id: id.to_string() });
        }
        if !self.actions_for(id).contains(&action) {
            return Err(AdminError::ActionNotAvailable {
                id: id.to_string(),
                action: action.label().to_string(),
            });
        }
        Ok(())
    }

    pub async fn approve(&mut self, id: &str) -> Result<()> {
        self.apply_status(
            id,
            ApplicationStatus::Approved,
            "Experience approved successfully",
            "Failed to approve experience",
        )
        .await
    }

    pub async fn reject(&mut self, id: &str) -> Result<()> {
        self.apply_status(
            id,
            ApplicationStatus::Rejected,
            "Experience rejected",
            "Failed to reject experience",
        )
        .await
    }

    /// Placeholder hook for a detail screen; only emits diagnostic output.
    pub fn view_details(&self, id: &str) -> Option<&ExperienceApplication> {
        let app = self.find(id);
        match app {
            Some(app) => tracing::info!("View details for: {:?}", app),
            None => tracing::warn!("View details requested for unknown experience {}", id),
        }
        app
    }

    /// Sequence number of the most recent mutation issued for `id`.
    pub fn last_sequence(&self, id: &str) -> Option<u64> {
        self.last_mutation.get(id).copied()
    }

    async fn apply_status(
        &mut self,
        id: &str,
        status: ApplicationStatus,
        success_message: &str,
        failure_message: &str,
    ) -> Result<()> {
        self.next_sequence += 1;
        let sequence = self.next_sequence;
        self.last_mutation.insert(id.to_string(), sequence);

        let patch = StatusPatch::new(status, Utc::now());
        tracing::debug!("Mutation #{}: setting {} to {}", sequence, id, status);

        if let Err(e) = self.store.update_status(id, &patch).await {
            tracing::debug!("Mutation #{} on {} failed: {}", sequence, id, e);
            self.notifier.error(failure_message);
            return Err(e);
        }

        tracing::info!("Mutation #{}: {} is now {}", sequence, id, status);
        self.notifier.success(success_message);

        // 重新同步；抓取失敗已在 refresh 內通知過
        if let Err(e) = self.refresh().await {
            tracing::warn!("Resync after mutation #{} failed: {}", sequence, e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStore {
        rows: Arc<Mutex<Vec<ExperienceApplication>>>,
        fail_fetch: Arc<AtomicBool>,
        fail_update: Arc<AtomicBool>,
        fetch_calls: Arc<AtomicUsize>,
    }

    impl MockStore {
        fn with_rows(rows: Vec<ExperienceApplication>) -> Self {
            Self {
                rows: Arc::new(Mutex::new(rows)),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl RecordStore for MockStore {
        async fn fetch_all_ordered(&self) -> Result<Vec<ExperienceApplication>> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_fetch.load(Ordering::SeqCst) {
                return Err(AdminError::StoreError {
                    status: 503,
                    message: "service unavailable".to_string(),
                });
            }
            let mut rows = self.rows.lock().await.clone();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows)
        }

        async fn update_status(&self, id: &str, patch: &StatusPatch) -> Result<()> {
            if self.fail_update.load(Ordering::SeqCst) {
                return Err(AdminError::StoreError {
                    status: 500,
                    message: "update failed".to_string(),
                });
            }
            let mut rows = self.rows.lock().await;
            for row in rows.iter_mut().filter(|row| row.id == id) {
                row.status = patch.status;
                row.updated_at = Some(patch.updated_at);
            }
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingNotifier {
        events: Arc<std::sync::Mutex<Vec<(bool, String)>>>,
    }

    impl RecordingNotifier {
        fn errors(&self) -> Vec<String> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter(|(ok, _)| !ok)
                .map(|(_, m)| m.clone())
                .collect()
        }

        fn successes(&self) -> Vec<String> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter(|(ok, _)| *ok)
                .map(|(_, m)| m.clone())
                .collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, message: &str) {
            self.events.lock().unwrap().push((true, message.to_string()));
        }

        fn error(&self, message: &str) {
            self.events.lock().unwrap().push((false, message.to_string()));
        }
    }

    fn app(id: &str, title: &str, location: &str, days_ago: i64) -> ExperienceApplication {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        ExperienceApplication {
            id: id.to_string(),
            title: title.to_string(),
            location: location.to_string(),
            category: "Tours".to_string(),
            price: Some(2500.0),
            duration: "4 hours".to_string(),
            status: ApplicationStatus::Pending,
            created_at: base - Duration::days(days_ago),
            updated_at: None,
            extra: HashMap::new(),
        }
    }

    fn fixtures() -> Vec<ExperienceApplication> {
        vec![
            app("a", "Adventure Tours India", "Mumbai, Maharashtra", 30),
            app("b", "Heritage Walks", "Delhi, NCR", 10),
        ]
    }

    #[tokio::test]
    async fn test_mount_loads_newest_first() {
        let store = MockStore::with_rows(fixtures());
        let mut view = ApplicationsView::new(store, RecordingNotifier::default());

        let count = view.mount().await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(view.applications()[0].id, "b");
        assert_eq!(view.applications()[1].id, "a");
    }

    #[tokio::test]
    async fn test_visible_follows_query() {
        let store = MockStore::with_rows(fixtures());
        let mut view = ApplicationsView::new(store, RecordingNotifier::default());
        view.mount().await.unwrap();

        view.set_query("delhi");
        let visible: Vec<&str> = view.visible().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(visible, vec!["b"]);

        view.set_query("");
        assert_eq!(view.visible().len(), 2);
    }

    #[tokio::test]
    async fn test_approve_then_refetch_shows_approved() {
        let store = MockStore::with_rows(fixtures());
        let notifier = RecordingNotifier::default();
        let mut view = ApplicationsView::new(store.clone(), notifier.clone());
        view.mount().await.unwrap();

        view.approve("a").await.unwrap();

        let approved = view.find("a").unwrap();
        assert_eq!(approved.status, ApplicationStatus::Approved);
        assert!(approved.is_featured());
        assert!(approved.updated_at.is_some());
        assert_eq!(view.actions_for("a"), vec![RowAction::ViewDetails]);
        assert_eq!(notifier.successes(), vec!["Experience approved successfully"]);
        // mount + resync
        assert_eq!(store.fetch_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_reject_shows_rejected_badge() {
        let store = MockStore::with_rows(fixtures());
        let notifier = RecordingNotifier::default();
        let mut view = ApplicationsView::new(store, notifier.clone());
        view.mount().await.unwrap();

        view.reject("b").await.unwrap();

        let rejected = view.find("b").unwrap();
        assert_eq!(rejected.status, ApplicationStatus::Rejected);
        assert!(!rejected.is_featured());
        // 舊版畫面這裡顯示 "Pending"；單一狀態列舉後可區分
        assert_eq!(rejected.status.badge(), "Rejected");
        assert_eq!(
            view.actions_for("b"),
            vec![RowAction::ViewDetails, RowAction::Approve, RowAction::Reject]
        );
        assert_eq!(notifier.successes(), vec!["Experience rejected"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_previous_collection() {
        let store = MockStore::with_rows(fixtures());
        let notifier = RecordingNotifier::default();
        let mut view = ApplicationsView::new(store.clone(), notifier.clone());
        view.mount().await.unwrap();
        let before = view.applications().to_vec();

        store.fail_fetch.store(true, Ordering::SeqCst);
        let result = view.refresh().await;

        assert!(result.is_err());
        assert_eq!(view.applications(), before.as_slice());
        assert_eq!(notifier.errors(), vec!["Failed to load applications"]);
    }

    #[tokio::test]
    async fn test_update_failure_notifies_and_skips_refetch() {
        let store = MockStore::with_rows(fixtures());
        let notifier = RecordingNotifier::default();
        let mut view = ApplicationsView::new(store.clone(), notifier.clone());
        view.mount().await.unwrap();

        store.fail_update.store(true, Ordering::SeqCst);
        assert!(view.approve("a").await.is_err());
        assert!(view.reject("a").await.is_err());

        assert_eq!(
            notifier.errors(),
            vec!["Failed to approve experience", "Failed to reject experience"]
        );
        assert_eq!(view.find("a").unwrap().status, ApplicationStatus::Pending);
        assert_eq!(store.fetch_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_repeated_approve_notifies_each_time() {
        let store = MockStore::with_rows(fixtures());
        let notifier = RecordingNotifier::default();
        let mut view = ApplicationsView::new(store.clone(), notifier.clone());
        view.mount().await.unwrap();

        view.approve("a").await.unwrap();
        view.approve("a").await.unwrap();

        assert_eq!(notifier.successes().len(), 2);
        assert_eq!(store.fetch_calls.load(Ordering::SeqCst), 3);
        assert_eq!(view.find("a").unwrap().status, ApplicationStatus::Approved);
        assert_eq!(view.last_sequence("a"), Some(2));
    }

    #[tokio::test]
    async fn test_resync_failure_after_successful_update() {
        let store = MockStore::with_rows(fixtures());
        let notifier = RecordingNotifier::default();
        let mut view = ApplicationsView::new(store.clone(), notifier.clone());
        view.mount().await.unwrap();

        store.fail_fetch.store(true, Ordering::SeqCst);
        view.approve("a").await.unwrap();

        // 本地沒有樂觀更新，清單維持原狀
        assert_eq!(view.find("a").unwrap().status, ApplicationStatus::Pending);
        assert_eq!(notifier.successes(), vec!["Experience approved successfully"]);
        assert_eq!(notifier.errors(), vec!["Failed to load applications"]);
    }

    #[tokio::test]
    async fn test_view_details_returns_known_record_only() {
        let store = MockStore::with_rows(fixtures());
        let mut view = ApplicationsView::new(store, RecordingNotifier::default());
        view.mount().await.unwrap();

        assert_eq!(view.view_details("b").map(|a| a.title.as_str()), Some("Heritage Walks"));
        assert!(view.view_details("missing").is_none());
        assert!(view.actions_for("missing").is_empty());
    }

    #[tokio::test]
    async fn test_ensure_action_refuses_unknown_and_approved_records() {
        let store = MockStore::with_rows(fixtures());
        let mut view = ApplicationsView::new(store, RecordingNotifier::default());
        view.mount().await.unwrap();

        assert!(view.ensure_action("a", RowAction::Approve).is_ok());
        assert!(view.ensure_action("a", RowAction::Reject).is_ok());
        assert!(matches!(
            view.ensure_action("missing", RowAction::Approve),
            Err(AdminError::NotFound { ref id }) if id == "missing"
        ));

        view.approve("a").await.unwrap();

        assert!(view.ensure_action("a", RowAction::ViewDetails).is_ok());
        for action in [RowAction::Approve, RowAction::Reject] {
            match view.ensure_action("a", action) {
                Err(AdminError::ActionNotAvailable { id, action: label }) => {
                    assert_eq!(id, "a");
                    assert_eq!(label, action.label());
                }
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }
}
