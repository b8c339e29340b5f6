//! Unit tests for the watcher context

#[cfg(test)]
mod tests {
    use crate::test_utils::*;
    use crate::watcher::Context;
    use kube_runtime::reflector;
    use kube_runtime::watcher::Event;
    use profile_client::MockProfileClient;
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    #[test]
    fn test_prune_backoff_forgets_deleted_profiles() {
        let client = MockProfileClient::new();
        let (store, mut writer) = reflector::store();
        let live = create_test_dashboard_profile("gpu", "ns", true);
        let deleted = create_test_dashboard_profile("small", "ns", true);
        writer.apply_watcher_event(&Event::Apply(live));
        writer.apply_watcher_event(&Event::Apply(deleted.clone()));

        let ctx = Context {
            reconciler: Arc::new(create_test_reconciler(&client)),
            cancel: CancellationToken::new(),
            store,
        };
        ctx.reconciler.record_failure("ns/gpu");
        ctx.reconciler.record_failure("ns/small");

        ctx.prune_backoff();
        assert_eq!(ctx.reconciler.failing_profiles(), 2);

        writer.apply_watcher_event(&Event::Delete(deleted));
        ctx.prune_backoff();
        assert_eq!(ctx.reconciler.failing_profiles(), 1);
        // The live profile keeps its place in the sequence
        assert_eq!(ctx.reconciler.record_failure("ns/gpu").1, 2);
    }
}
