//! Shared state handed to every scenario.

use bookcart_core::{BookCartClient, CartApi, DataFactory, LoginResponse};
use rand::rngs::StdRng;

use crate::error::{ensure, ensure_status, ScenarioResult};

/// Token and user id of a logged-in fixture account.
#[derive(Debug, Clone)]
pub struct AuthCredentials {
    pub user_id: u64,
    pub token: String,
}

pub struct Context {
    pub client: BookCartClient,
    pub factory: DataFactory<StdRng>,
}

impl Context {
    pub fn new(client: BookCartClient, factory: DataFactory<StdRng>) -> Self {
        Self { client, factory }
    }

    /// Logs in with a random valid fixture account.
    pub fn auth_credentials(&mut self) -> ScenarioResult<AuthCredentials> {
        let creds = self.factory.valid_user_credentials()?;
        let resp = self.client.users.login_user(&creds.username, &creds.password)?;
        ensure_status("login for auth fixture", 200, resp.status)?;
        let login: LoginResponse = resp.json()?;
        ensure(!login.token.is_empty(), || "login returned an empty token".to_string())?;
        Ok(AuthCredentials {
            user_id: creds.user_id,
            token: login.token,
        })
    }

    /// Picks a random book id from the live catalog.
    pub fn random_book_id(&mut self) -> ScenarioResult<u64> {
        let resp = self.client.books.get_all_books()?;
        ensure_status("get books for book id fixture", 200, resp.status)?;
        Ok(self.factory.random_book_id(&resp)?)
    }

    /// Removes `book_id` from the user's cart when the returned guard drops.
    pub fn cleanup_cart(&self, user_id: u64, book_id: u64) -> CartCleanup {
        CartCleanup {
            cart: self.client.cart.clone(),
            user_id,
            book_id,
        }
    }
}

/// Best-effort teardown: removes one cart entry on drop. Failures are
/// discarded without a log event and never change a scenario's outcome.
pub struct CartCleanup {
    cart: CartApi,
    user_id: u64,
    book_id: u64,
}

impl Drop for CartCleanup {
    fn drop(&mut self) {
        let _ = self.cart.remove_from_cart(self.user_id, self.book_id);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use bookcart_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, TestData, Transport};
    use rand::SeedableRng;

    use super::*;

    /// Fails every call after recording it.
    #[derive(Default)]
    struct FailingTransport {
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl Transport for FailingTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.lock().unwrap().push(request.clone());
            Err(ApiError::Http {
                status: 503,
                body: "down".to_string(),
            })
        }
    }

    #[test]
    fn cleanup_swallows_errors_and_sends_delete() {
        let transport = Arc::new(FailingTransport::default());
        let client = BookCartClient::with_transport("http://localhost", transport.clone());
        let ctx = Context::new(
            client,
            DataFactory::new(TestData::default(), StdRng::seed_from_u64(0)),
        );

        drop(ctx.cleanup_cart(4, 9));

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, HttpMethod::Delete);
        assert_eq!(seen[0].path, "http://localhost/ShoppingCart/4/9");
    }

    struct CountEvents(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for CountEvents {
        fn on_event(
            &self,
            _event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn failed_cleanup_is_silent() {
        use tracing_subscriber::layer::SubscriberExt;

        let transport = Arc::new(FailingTransport::default());
        let client = BookCartClient::with_transport("http://localhost", transport.clone());
        let ctx = Context::new(
            client,
            DataFactory::new(TestData::default(), StdRng::seed_from_u64(0)),
        );

        let events = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(CountEvents(events.clone()));
        tracing::subscriber::with_default(subscriber, || drop(ctx.cleanup_cart(4, 9)));

        assert_eq!(transport.seen.lock().unwrap().len(), 1);
        assert_eq!(events.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn auth_without_fixture_users_fails() {
        let transport = Arc::new(FailingTransport::default());
        let client = BookCartClient::with_transport("http://localhost", transport.clone());
        let mut ctx = Context::new(
            client,
            DataFactory::new(TestData::default(), StdRng::seed_from_u64(0)),
        );
        assert!(ctx.auth_credentials().is_err());
        assert!(transport.seen.lock().unwrap().is_empty());
    }
}
