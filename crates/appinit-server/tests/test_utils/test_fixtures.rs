//! Fixtures for service tests

use super::recording_dispatcher::{Journal, RecordingDispatcher};
use appinit_domain::ports::DispatcherAdapter;
use appinit_infrastructure::config::AppConfig;
use appinit_server::{ExitPolicy, Service};
use std::convert::Infallible;
use std::net::TcpListener;
use std::sync::Arc;

/// Service that returns fatal errors instead of exiting
pub fn test_service() -> Service {
    Service::new(AppConfig::default().with_service_name("test"))
        .with_exit_policy(ExitPolicy::ReturnError)
}

/// Bind `dispatcher` as the service's dispatcher adapter
pub fn bind_dispatcher(service: &mut Service, dispatcher: &Arc<RecordingDispatcher>) {
    let dispatcher = Arc::clone(dispatcher);
    service
        .register_type(move || -> Result<Arc<dyn DispatcherAdapter>, Infallible> {
            Ok(Arc::clone(&dispatcher) as Arc<dyn DispatcherAdapter>)
        })
        .unwrap();
}

/// Service bound to a fresh recording dispatcher
pub fn recorded_service() -> (Service, Arc<RecordingDispatcher>, Journal) {
    let journal = Journal::default();
    let dispatcher = Arc::new(RecordingDispatcher::new(journal.clone()));
    let mut service = test_service();
    bind_dispatcher(&mut service, &dispatcher);
    (service, dispatcher, journal)
}

/// Whether two handles point at the same dispatcher
pub fn same_dispatcher(a: &Arc<dyn DispatcherAdapter>, b: &Arc<RecordingDispatcher>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// A localhost address nothing is listening on right now
pub fn free_local_addr() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().to_string()
}
