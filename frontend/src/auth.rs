//! Auth module
//!
//! Owns the session for the whole UI. The router only sees the session
//! signal; pages mutate it through `login`/`logout`.

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use studyapp::{ApiResult, HttpClient, StudyApi};
use studyapp_shared::session::{KeyValueStore, Role, Session, SessionStore};

use crate::web::LocalStorage as BrowserStorage;

// =========================================================
// Sign-in tickets
// =========================================================

/// Orders sign-in attempts. Each submit takes a ticket; only the newest one
/// may apply its response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoginTickets {
    latest: u64,
}

impl LoginTickets {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }

    /// A response may apply if no newer attempt started and nobody signed in
    /// meanwhile.
    pub fn accepts(&self, ticket: u64, session: &Session) -> bool {
        ticket == self.latest && !session.is_authenticated()
    }
}

// =========================================================
// Context
// =========================================================

/// Auth context
///
/// `store` is the only writer of the persisted session; `session` mirrors
/// it for the reactive graph.
#[derive(Clone, Copy)]
pub struct AuthContext {
    store: StoredValue<SessionStore<Box<dyn KeyValueStore>>, LocalStorage>,
    session: RwSignal<Session>,
    tickets: StoredValue<LoginTickets>,
}

impl AuthContext {
    /// Restores the session from `localStorage`.
    pub fn new() -> Self {
        Self::with_storage(BrowserStorage)
    }

    pub fn with_storage(storage: impl KeyValueStore + 'static) -> Self {
        let store = SessionStore::restore(Box::new(storage) as Box<dyn KeyValueStore>);
        let session = store.session().clone();
        log_info!(
            "[Session] restored: {}",
            session.role().map(|r| r.as_str()).unwrap_or("anonymous")
        );

        Self {
            store: StoredValue::new_local(store),
            session: RwSignal::new(session),
            tickets: StoredValue::new(LoginTickets::default()),
        }
    }

    /// Read-only session signal, injected into the router.
    pub fn session_signal(&self) -> Signal<Session> {
        let session = self.session;
        Signal::derive(move || session.get())
    }

    pub fn session_untracked(&self) -> Session {
        self.session.get_untracked()
    }

    pub fn login(&self, role: Role, token: Option<String>, username: Option<String>) {
        let was_persistent = self.store.with_value(|s| s.is_persistent());
        self.store.update_value(|s| {
            s.login(role, token, username);
        });
        log_info!("[Auth] signed in as {}", role);
        self.publish(was_persistent);
    }

    /// Ends the session. Closing the sidebar and leaving for `/login` is the
    /// caller's job.
    pub fn logout(&self) {
        let was_persistent = self.store.with_value(|s| s.is_persistent());
        self.store.update_value(|s| {
            s.logout();
        });
        log_info!("[Auth] signed out");
        self.publish(was_persistent);
    }

    fn publish(&self, was_persistent: bool) {
        let (session, persistent) = self
            .store
            .with_value(|s| (s.session().clone(), s.is_persistent()));
        if was_persistent && !persistent {
            log_warn!("[Session] storage write failed, session is memory-only from now on");
        }
        self.session.set(session);
    }

    fn issue_ticket(&self) -> u64 {
        self.tickets.update_value(|t| {
            t.issue();
        });
        self.tickets.with_value(LoginTickets::latest)
    }

    fn accepts(&self, ticket: u64) -> bool {
        let session = self.session.get_untracked();
        self.tickets.with_value(|t| t.accepts(ticket, &session))
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

// =========================================================
// Sign-in flow
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInResult {
    /// The session now holds this role.
    Applied(Role),
    /// A newer attempt or another sign-in won; nothing changed.
    Discarded,
}

/// Calls `POST /auth/signin` and, if this is still the newest attempt,
/// stores the session. Rejections come back as errors for the form.
pub async fn sign_in<C: HttpClient>(
    ctx: AuthContext,
    api: &StudyApi<C>,
    username: &str,
    password: &str,
) -> ApiResult<SignInResult> {
    let ticket = ctx.issue_ticket();
    let outcome = api
        .sign_in(username, password)
        .await
        .map_err(|e| e.in_op_with("auth.sign_in", format!("ticket {}", ticket)))?;

    if !ctx.accepts(ticket) {
        log_info!("[Auth] discarding stale sign-in response (ticket {})", ticket);
        return Ok(SignInResult::Discarded);
    }

    ctx.login(outcome.role, Some(outcome.token), Some(username.to_string()));
    Ok(SignInResult::Applied(outcome.role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use studyapp::{ApiError, HttpRequest, HttpResponse};
    use studyapp_shared::session::KEY_ACCESS_TOKEN;
    use studyapp_shared::session::testing::MemoryStore;

    /// Each request waits for the next gate; the test decides when and with
    /// what each one answers.
    #[derive(Default)]
    struct GatedClient {
        gates: RefCell<VecDeque<oneshot::Receiver<HttpResponse>>>,
    }

    impl GatedClient {
        fn gate(&self) -> oneshot::Sender<HttpResponse> {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().push_back(rx);
            tx
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpClient for GatedClient {
        async fn send(&self, _req: HttpRequest) -> ApiResult<HttpResponse> {
            let gate = self.gates.borrow_mut().pop_front();
            match gate {
                Some(rx) => rx.await.map_err(|_| ApiError::transport("gate dropped")),
                None => Err(ApiError::transport("no gate")),
            }
        }
    }

    fn signed_in(token: &str, role: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: format!(r#"{{"accessToken":"{}","roles":["{}"]}}"#, token, role),
        }
    }

    fn setup() -> (Owner, AuthContext, MemoryStore) {
        let owner = Owner::new();
        owner.set();
        let storage = MemoryStore::new();
        let ctx = AuthContext::with_storage(storage.clone());
        (owner, ctx, storage)
    }

    #[test]
    fn test_tickets_increase() {
        let mut tickets = LoginTickets::default();
        assert_eq!(tickets.issue(), 1);
        assert_eq!(tickets.issue(), 2);
        assert_eq!(tickets.latest(), 2);
    }

    #[test]
    fn test_only_latest_ticket_applies() {
        let mut tickets = LoginTickets::default();
        let first = tickets.issue();
        let second = tickets.issue();
        let anon = Session::anonymous();

        assert!(!tickets.accepts(first, &anon));
        assert!(tickets.accepts(second, &anon));
    }

    #[test]
    fn test_no_apply_once_signed_in() {
        let mut tickets = LoginTickets::default();
        let ticket = tickets.issue();
        let session = Session::authenticated(Role::User, Some("t".to_string()), None);
        assert!(!tickets.accepts(ticket, &session));
    }

    #[test]
    fn test_sign_in_applies_and_persists() {
        let (_owner, ctx, storage) = setup();
        let client = GatedClient::default();
        let gate = client.gate();
        let api = StudyApi::new("http://api.test", client);
        let _ = gate.send(signed_in("abc", "ROLE_ADMIN"));

        let result = block_on(sign_in(ctx, &api, "lan", "pw")).unwrap();
        assert_eq!(result, SignInResult::Applied(Role::Admin));

        let session = ctx.session_untracked();
        assert!(session.is_admin());
        assert_eq!(session.token(), Some("abc"));
        assert_eq!(session.username(), Some("lan"));
        assert_eq!(storage.value(KEY_ACCESS_TOKEN).as_deref(), Some("abc"));
    }

    #[test]
    fn test_only_newest_concurrent_sign_in_applies() {
        let (_owner, ctx, _storage) = setup();
        let client = GatedClient::default();
        let first_gate = client.gate();
        let second_gate = client.gate();
        let api = StudyApi::new("http://api.test", client);

        let (first, second, ()) = block_on(async {
            futures::join!(
                sign_in(ctx, &api, "lan", "pw"),
                sign_in(ctx, &api, "binh", "pw"),
                async {
                    // The older attempt answers last.
                    let _ = second_gate.send(signed_in("t2", "ROLE_USER"));
                    let _ = first_gate.send(signed_in("t1", "ROLE_ADMIN"));
                }
            )
        });

        assert_eq!(first.unwrap(), SignInResult::Discarded);
        assert_eq!(second.unwrap(), SignInResult::Applied(Role::User));
        let session = ctx.session_untracked();
        assert_eq!(session.token(), Some("t2"));
        assert_eq!(session.username(), Some("binh"));
    }

    #[test]
    fn test_sign_in_discarded_when_already_signed_in() {
        let (_owner, ctx, _storage) = setup();
        let client = GatedClient::default();
        let gate = client.gate();
        let api = StudyApi::new("http://api.test", client);

        let (result, ()) = block_on(async {
            futures::join!(sign_in(ctx, &api, "lan", "pw"), async {
                ctx.login(Role::User, Some("other".into()), Some("binh".into()));
                let _ = gate.send(signed_in("abc", "ROLE_ADMIN"));
            })
        });

        assert_eq!(result.unwrap(), SignInResult::Discarded);
        assert_eq!(ctx.session_untracked().token(), Some("other"));
    }

    #[test]
    fn test_rejected_sign_in_leaves_session_alone() {
        let (_owner, ctx, _storage) = setup();
        let client = GatedClient::default();
        let gate = client.gate();
        let api = StudyApi::new("http://api.test", client);
        let _ = gate.send(HttpResponse {
            status: 401,
            body: r#"{"message":"Invalid Password!"}"#.to_string(),
        });

        let err = block_on(sign_in(ctx, &api, "lan", "bad")).unwrap_err();
        assert_eq!(err.server_message(), Some("Invalid Password!"));
        assert!(!ctx.session_untracked().is_authenticated());
    }

    #[test]
    fn test_logout_clears_persisted_login() {
        let (_owner, ctx, storage) = setup();
        ctx.login(Role::Admin, Some("abc".into()), Some("lan".into()));
        ctx.logout();

        let reloaded = AuthContext::with_storage(storage);
        assert!(!reloaded.session_untracked().is_authenticated());
        assert_eq!(reloaded.session_untracked().username(), Some("lan"));
    }
}
