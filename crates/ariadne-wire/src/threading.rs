//! Conversation threading over the `~thread` decorator.
//!
//! Every message has a thread identity: the `thid` of its thread decorator,
//! or its own id when it carries none. Replies either continue the thread of
//! the message they answer ([`thread_from`]) or open a child thread nested
//! under it ([`thread_child_message`]).
//!
//! The functions here are pure and operate only on the caller's message.
//! Read accessors never fail; mutating ones enforce the set-once rules.

use ariadne_types::decorator::ThreadDecorator;
use ariadne_types::error::{AriadneError, AriadneResult};
use ariadne_types::message::{AgentMessage, MessageShape};
use tracing::warn;

/// Decorator name of the thread block.
pub const THREAD_DECORATOR: &str = "thread";

fn thread_decorator<M: AgentMessage + ?Sized>(message: &M) -> Option<&ThreadDecorator> {
    message
        .decorators()
        .find::<ThreadDecorator>(THREAD_DECORATOR)
}

/// Thread id of `message`, falling back to its own id.
pub fn get_thread_id<M: AgentMessage + ?Sized>(message: &M) -> &str {
    thread_decorator(message)
        .map(|thread| thread.thread_id.as_str())
        .filter(|thread_id| !thread_id.is_empty())
        .unwrap_or_else(|| message.id())
}

/// Parent thread id of `message`, if one is set.
pub fn get_parent_thread_id<M: AgentMessage + ?Sized>(message: &M) -> Option<&str> {
    thread_decorator(message).and_then(ThreadDecorator::parent)
}

/// Continue the conversation of `previous` in `message`.
///
/// Fails with [`AriadneError::AlreadyThreaded`] if `message` already has a
/// thread decorator.
pub fn thread_from<M, P>(message: &mut M, previous: &P) -> AriadneResult<()>
where
    M: AgentMessage + ?Sized,
    P: AgentMessage + ?Sized,
{
    if message
        .decorators()
        .get::<ThreadDecorator>(THREAD_DECORATOR)
        .is_ok()
    {
        return Err(AriadneError::AlreadyThreaded(message.id().to_string()));
    }

    let mut thread = ThreadDecorator::new(get_thread_id(previous));
    thread.parent_thread_id = get_parent_thread_id(previous).map(str::to_string);
    message.decorators_mut().add(thread, THREAD_DECORATOR)
}

/// Build a `T` that continues the conversation of `message`.
pub fn create_threaded_reply<T, P>(message: &P) -> AriadneResult<T>
where
    T: MessageShape,
    P: AgentMessage + ?Sized,
{
    let mut reply = T::default();
    thread_from(&mut reply, message)?;
    Ok(reply)
}

/// Open a child thread of `parent` in `message`, replacing any prior thread.
///
/// The child shares the parent's thread id. When the parent was itself
/// threaded, that id is also recorded as the child's parent thread.
pub fn thread_child_message<M, P>(message: &mut M, parent: &P)
where
    M: AgentMessage + ?Sized,
    P: AgentMessage + ?Sized,
{
    let parent_threaded = thread_decorator(parent).is_some();
    let thread_id = get_thread_id(parent).to_string();
    let thread = if parent_threaded {
        ThreadDecorator::new(thread_id.clone()).with_parent(thread_id)
    } else {
        ThreadDecorator::new(thread_id)
    };
    // `thread` is registered for ThreadDecorator, so set cannot fail.
    if let Err(e) = message.decorators_mut().set(thread, THREAD_DECORATOR) {
        warn!(error = %e, "Thread decorator rejected");
    }
}

/// Build a `T` that opens a child thread of `parent`.
pub fn create_child_threaded_reply<T, P>(parent: &P) -> T
where
    T: MessageShape,
    P: AgentMessage + ?Sized,
{
    let mut reply = T::default();
    thread_child_message(&mut reply, parent);
    reply
}

/// Nest `message` under the thread `parent_thread_id`.
///
/// An unthreaded message becomes the root of its own thread with the given
/// parent. A threaded message gains the parent in place, unless it already
/// has one, in which case this fails with [`AriadneError::ParentAlreadySet`].
pub fn thread_from_parent<M>(message: &mut M, parent_thread_id: &str) -> AriadneResult<()>
where
    M: AgentMessage + ?Sized,
{
    match thread_decorator(message).cloned() {
        None => {
            let thread = ThreadDecorator::new(message.id()).with_parent(parent_thread_id);
            message.decorators_mut().add(thread, THREAD_DECORATOR)
        }
        Some(mut thread) => {
            if let Some(existing) = thread.parent() {
                return Err(AriadneError::ParentAlreadySet {
                    message_id: message.id().to_string(),
                    parent_thread_id: existing.to_string(),
                });
            }
            thread.parent_thread_id = Some(parent_thread_id.to_string());
            message.decorators_mut().set(thread, THREAD_DECORATOR)
        }
    }
}

/// [`thread_from_parent`] using the thread id of `parent`.
pub fn thread_from_parent_message<M, P>(message: &mut M, parent: &P) -> AriadneResult<()>
where
    M: AgentMessage + ?Sized,
    P: AgentMessage + ?Sized,
{
    let parent_thread_id = get_thread_id(parent).to_string();
    thread_from_parent(message, &parent_thread_id)
}

/// Attach an explicit thread decorator.
pub fn thread_with<M>(
    message: &mut M,
    thread_id: &str,
    parent_thread_id: Option<&str>,
) -> AriadneResult<()>
where
    M: AgentMessage + ?Sized,
{
    let mut thread = ThreadDecorator::new(thread_id);
    thread.parent_thread_id = parent_thread_id.map(str::to_string);
    message.decorators_mut().add(thread, THREAD_DECORATOR)
}

/// Method-call sugar for the threading functions.
pub trait ThreadExt: AgentMessage {
    fn thread_id(&self) -> &str {
        get_thread_id(self)
    }

    fn parent_thread_id(&self) -> Option<&str> {
        get_parent_thread_id(self)
    }

    fn create_threaded_reply<T: MessageShape>(&self) -> AriadneResult<T> {
        create_threaded_reply(self)
    }

    fn create_child_threaded_reply<T: MessageShape>(&self) -> T {
        create_child_threaded_reply(self)
    }
}

impl<M: AgentMessage + ?Sized> ThreadExt for M {}

#[cfg(test)]
mod tests {
    use super::*;
    use ariadne_types::messages::{
        CredentialOfferMessage, TrustPingMessage, TrustPingResponseMessage,
    };

    fn threaded(thread_id: &str, parent: Option<&str>) -> TrustPingMessage {
        let mut message = TrustPingMessage::new(true);
        thread_with(&mut message, thread_id, parent).unwrap();
        message
    }

    #[test]
    fn test_thread_id_falls_back_to_message_id() {
        let message = TrustPingMessage::new(true);
        assert_eq!(get_thread_id(&message), message.id());
        assert_eq!(get_parent_thread_id(&message), None);
    }

    #[test]
    fn test_thread_id_reads_decorator() {
        let message = threaded("t-1", Some("p-1"));
        assert_eq!(get_thread_id(&message), "t-1");
        assert_eq!(get_parent_thread_id(&message), Some("p-1"));
    }

    #[test]
    fn test_empty_thread_id_falls_back() {
        let message = threaded("", None);
        assert_eq!(get_thread_id(&message), message.id());
    }

    #[test]
    fn test_thread_from_unthreaded_previous() {
        let previous = TrustPingMessage::new(true);
        let mut reply = TrustPingResponseMessage::default();
        thread_from(&mut reply, &previous).unwrap();
        assert_eq!(get_thread_id(&reply), previous.id());
        assert_eq!(get_parent_thread_id(&reply), None);
    }

    #[test]
    fn test_thread_from_continues_thread() {
        let previous = threaded("t-1", Some("p-1"));
        let mut reply = TrustPingResponseMessage::default();
        thread_from(&mut reply, &previous).unwrap();
        assert_eq!(get_thread_id(&reply), "t-1");
        assert_eq!(get_parent_thread_id(&reply), Some("p-1"));
    }

    #[test]
    fn test_thread_from_twice_fails() {
        let previous = TrustPingMessage::new(true);
        let mut reply = TrustPingResponseMessage::default();
        thread_from(&mut reply, &previous).unwrap();
        let err = thread_from(&mut reply, &previous).unwrap_err();
        assert_eq!(err, AriadneError::AlreadyThreaded(reply.id().to_string()));
    }

    #[test]
    fn test_thread_from_rejects_explicitly_threaded() {
        let previous = TrustPingMessage::new(true);
        let mut reply = threaded("other", None);
        assert!(matches!(
            thread_from(&mut reply, &previous),
            Err(AriadneError::AlreadyThreaded(_))
        ));
        // Existing thread untouched
        assert_eq!(get_thread_id(&reply), "other");
    }

    #[test]
    fn test_create_threaded_reply() {
        let ping = threaded("t-9", None);
        let reply: TrustPingResponseMessage = create_threaded_reply(&ping).unwrap();
        assert_ne!(reply.id(), ping.id());
        assert_eq!(get_thread_id(&reply), "t-9");
    }

    #[test]
    fn test_child_of_threaded_parent() {
        let parent = threaded("t-1", None);
        let mut child = CredentialOfferMessage::new("{}");
        thread_child_message(&mut child, &parent);
        assert_eq!(get_thread_id(&child), get_thread_id(&parent));
        assert_eq!(get_parent_thread_id(&child), Some(get_thread_id(&parent)));
    }

    #[test]
    fn test_child_of_unthreaded_parent() {
        let parent = TrustPingMessage::new(false);
        let child: CredentialOfferMessage = create_child_threaded_reply(&parent);
        assert_eq!(get_thread_id(&child), parent.id());
        assert_eq!(get_parent_thread_id(&child), None);
    }

    #[test]
    fn test_child_overwrites_prior_thread() {
        let parent = threaded("t-2", None);
        let mut child = threaded("stale", Some("stale-parent"));
        thread_child_message(&mut child, &parent);
        assert_eq!(get_thread_id(&child), "t-2");
        assert_eq!(get_parent_thread_id(&child), Some("t-2"));
    }

    #[test]
    fn test_thread_from_parent_on_unthreaded() {
        let mut message = TrustPingMessage::new(true);
        thread_from_parent(&mut message, "pid-1").unwrap();
        assert_eq!(get_thread_id(&message), message.id());
        assert_eq!(get_parent_thread_id(&message), Some("pid-1"));
    }

    #[test]
    fn test_thread_from_parent_twice_fails() {
        let mut message = TrustPingMessage::new(true);
        thread_from_parent(&mut message, "pid-1").unwrap();
        match thread_from_parent(&mut message, "pid-2") {
            Err(AriadneError::ParentAlreadySet {
                parent_thread_id, ..
            }) => assert_eq!(parent_thread_id, "pid-1"),
            other => panic!("Expected ParentAlreadySet, got {other:?}"),
        }
        assert_eq!(get_parent_thread_id(&message), Some("pid-1"));
    }

    #[test]
    fn test_thread_from_parent_upgrades_root() {
        let mut message = threaded("t-3", None);
        thread_from_parent(&mut message, "pid-9").unwrap();
        assert_eq!(get_thread_id(&message), "t-3");
        assert_eq!(get_parent_thread_id(&message), Some("pid-9"));
    }

    #[test]
    fn test_thread_from_parent_treats_empty_parent_as_unset() {
        let mut message = threaded("t-4", Some(""));
        thread_from_parent(&mut message, "pid-5").unwrap();
        assert_eq!(get_parent_thread_id(&message), Some("pid-5"));
    }

    #[test]
    fn test_thread_from_parent_message() {
        let parent = threaded("t-parent", None);
        let mut message = TrustPingMessage::new(false);
        thread_from_parent_message(&mut message, &parent).unwrap();
        assert_eq!(get_parent_thread_id(&message), Some("t-parent"));
    }

    #[test]
    fn test_thread_with_twice_is_duplicate() {
        let mut message = threaded("t-1", None);
        let err = thread_with(&mut message, "t-2", None).unwrap_err();
        assert_eq!(err, AriadneError::DuplicateDecorator("thread".to_string()));
    }

    #[test]
    fn test_works_through_trait_objects() {
        let previous: Box<dyn AgentMessage> = Box::new(threaded("t-dyn", None));
        let mut reply: Box<dyn AgentMessage> = Box::new(TrustPingResponseMessage::default());
        thread_from(reply.as_mut(), previous.as_ref()).unwrap();
        assert_eq!(reply.thread_id(), "t-dyn");
        assert_eq!(previous.thread_id(), "t-dyn");
    }

    #[test]
    fn test_ext_trait_reply() {
        let ping = TrustPingMessage::new(true);
        let reply = ping
            .create_threaded_reply::<TrustPingResponseMessage>()
            .unwrap();
        assert_eq!(reply.thread_id(), ping.id());
        assert_eq!(reply.parent_thread_id(), None);
    }
}
