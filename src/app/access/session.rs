//! 浏览器会话
//!
//! 每个浏览器一个会话，只记两件事：是否已通过口令，以及更新表单里上次填写的 SSN。
//! 只有口令验证通过的会话才会存入表里，未登录的访问只拿到一个 cookie。

use axum::http::{header::COOKIE, HeaderMap};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "employee_desk_session";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Set-Cookie` 头的值
    pub fn cookie(&self) -> String {
        format!("{}={}; Path=/; HttpOnly; SameSite=Strict", SESSION_COOKIE, self.0)
    }

    /// 从 `Cookie` 请求头里取会话 ID
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| Self(value.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub password_verified: bool,
    pub remembered_ssn: String,
}

struct Entry {
    session: Session,
    last_seen: Instant,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<SessionId, Entry>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Entry>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 发一个新的会话 ID，不落库；口令验证通过后才真正建立会话
    pub fn issue(&self) -> SessionId {
        SessionId(Uuid::new_v4().to_string())
    }

    /// 会话存在且未过期时刷新活跃时间并返回 true
    pub fn touch(&self, id: &SessionId) -> bool {
        let now = Instant::now();
        let mut sessions = self.lock();
        let alive = sessions
            .get(id)
            .is_some_and(|entry| now.duration_since(entry.last_seen) < self.ttl);

        if alive {
            if let Some(entry) = sessions.get_mut(id) {
                entry.last_seen = now;
            }
        } else {
            sessions.remove(id);
        }
        alive
    }

    pub fn get(&self, id: &SessionId) -> Session {
        self.lock()
            .get(id)
            .map(|entry| entry.session.clone())
            .unwrap_or_default()
    }

    pub fn is_verified(&self, id: &SessionId) -> bool {
        self.get(id).password_verified
    }

    /// 口令通过：建立（或刷新）会话，顺带清理过期会话
    pub fn mark_verified(&self, id: &SessionId) {
        let now = Instant::now();
        let mut sessions = self.lock();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < self.ttl);
        let entry = sessions.entry(id.clone()).or_insert_with(|| Entry {
            session: Session::default(),
            last_seen: now,
        });
        entry.session.password_verified = true;
        entry.last_seen = now;
    }

    pub fn remember_ssn(&self, id: &SessionId, ssn: &str) {
        self.update(id, |session| session.remembered_ssn = ssn.to_string());
    }

    /// 退出登录：清除口令标记和记住的 SSN
    pub fn logout(&self, id: &SessionId) {
        self.lock().remove(id);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn update(&self, id: &SessionId, apply: impl FnOnce(&mut Session)) {
        if let Some(entry) = self.lock().get_mut(id) {
            apply(&mut entry.session);
        }
    }
}
