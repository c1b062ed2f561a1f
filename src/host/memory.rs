//! In-process host channel.
//!
//! `MemoryHost` plays the edge host inside the current process: it keeps the
//! descriptor table, moves chunks through FIFO pipes, answers fetches with an
//! [`Upstream`], stores objects in memory, and records how every descriptor
//! ended. Useful for running functions locally and for tests.
//!
//! Pipes have two descriptors: the function owns one end and the host side
//! (upstream, object store, client) owns the other. A write end that is
//! aborted or released makes the read end fail with
//! [`StreamError::ChannelClosed`] instead of reporting end of data.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tokio::sync::{mpsc, oneshot};

use super::{FetchHead, HostChannel, StorageHead, StreamDescriptor};
use crate::error::{HttpError, StorageError, StreamError};
use crate::fetch::HttpFetch;
use crate::http::{HttpHeaders, HttpMethod, HttpStatusCode, validate_status};
use crate::options::Limits;
use crate::request::HttpRequest;
use crate::response::HttpResponse;
use crate::storage::{FileAttributes, format_properties, parse_properties, validate_location};
use crate::stream::ReadStream;

/// Multiplier that spreads sequence numbers over the descriptor space.
/// Odd, so distinct sequence numbers never collide.
const DESCRIPTOR_SPREAD: u32 = 2_654_435_761;

/// Number of terminations remembered for [`MemoryHost::termination`].
const TERMINATION_LOG_CAPACITY: usize = 4096;

const DEFAULT_MAX_OBJECT_SIZE: usize = 64 * 1024 * 1024;

/// How a descriptor ended, as observed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// Orderly close; for write streams the body is complete.
    Closed,
    /// Explicit abort; the body is incomplete.
    Aborted,
    /// The handle was dropped while live; write streams count as aborted.
    Released,
}

/// Answer of an [`Upstream`] to a fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: HttpStatusCode,
    pub headers: HttpHeaders,
    pub body: Bytes,
}

impl UpstreamReply {
    pub fn new(status: HttpStatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HttpHeaders::new(),
            body: body.into(),
        }
    }
}

/// Remote server reached by fetches through a [`MemoryHost`].
///
/// `body` is the request body as the remote sees it. An upstream may answer
/// before reading it; dropping the stream makes further request writes fail
/// with [`StreamError::ChannelClosed`].
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn handle(&self, request: HttpFetch, body: ReadStream) -> Result<UpstreamReply, HttpError>;
}

/// Answers `200` with the request body, once the request body is complete.
struct EchoUpstream;

#[async_trait]
impl Upstream for EchoUpstream {
    async fn handle(
        &self,
        request: HttpFetch,
        mut body: ReadStream,
    ) -> Result<UpstreamReply, HttpError> {
        let bytes = body.read_all().await;
        let _ = body.close().await;
        let bytes = bytes.map_err(|_| HttpError::FetchRequestFailed)?;
        let mut reply = UpstreamReply::new(200, bytes);
        if let Some(content_type) = request.headers.get("content-type") {
            reply.headers.set("content-type", content_type);
        }
        Ok(reply)
    }
}

/// What the client of the function receives.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedResponse {
    pub head: HttpResponse,
    pub body: Bytes,
    /// How the function ended the body stream; `None` while still open.
    pub termination: Option<Termination>,
}

impl RecordedResponse {
    pub fn is_complete(&self) -> bool {
        self.termination == Some(Termination::Closed)
    }
}

struct Pipe {
    tx: Mutex<Option<mpsc::UnboundedSender<Bytes>>>,
    rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<Bytes>>,
    end: Mutex<Option<Termination>>,
    reader_gone: AtomicBool,
}

impl Pipe {
    fn new() -> Arc<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        Arc::new(Self {
            tx: Mutex::new(Some(tx)),
            rx: tokio::sync::Mutex::new(rx),
            end: Mutex::new(None),
            reader_gone: AtomicBool::new(false),
        })
    }

    fn end(&self) -> Option<Termination> {
        *lock(&self.end)
    }

    fn finish(&self, how: Termination) {
        let mut end = lock(&self.end);
        if end.is_none() {
            *end = Some(how);
        }
        drop(end);
        lock(&self.tx).take();
    }

    fn is_broken(&self) -> bool {
        matches!(
            self.end(),
            Some(Termination::Aborted | Termination::Released)
        )
    }
}

enum Slot {
    Writer(Arc<Pipe>),
    Reader(Arc<Pipe>),
}

struct StoredObject {
    body: Bytes,
    attributes: FileAttributes,
}

enum StoredEntry {
    Live(StoredObject),
    /// Tombstone left by a delete, until the name is uploaded again.
    Deleted,
}

type ObjectKey = (String, String);

fn key(bucket_id: &str, file_name: &str) -> ObjectKey {
    (bucket_id.to_string(), file_name.to_string())
}

struct ClientResponse {
    head: HttpResponse,
    writer: StreamDescriptor,
    reader: StreamDescriptor,
}

#[derive(Default)]
struct State {
    next_seq: u32,
    slots: HashMap<StreamDescriptor, Slot>,
    terminations: HashMap<StreamDescriptor, Termination>,
    termination_order: VecDeque<StreamDescriptor>,
    pending_fetch: HashMap<StreamDescriptor, oneshot::Receiver<Result<FetchHead, HttpError>>>,
    pending_storage:
        HashMap<StreamDescriptor, oneshot::Receiver<Result<StorageHead, StorageError>>>,
    objects: HashMap<ObjectKey, StoredEntry>,
    client_request: HttpRequest,
    client_body: Option<Bytes>,
    client_response: Option<ClientResponse>,
}

impl State {
    /// Next descriptor. Fails once the sequence is exhausted rather than
    /// reissue a descriptor.
    fn issue(&mut self) -> Result<StreamDescriptor, StreamError> {
        let Some(seq) = self.next_seq.checked_add(1) else {
            tracing::warn!("descriptor space exhausted");
            return Err(StreamError::SystemError);
        };
        self.next_seq = seq;
        Ok(StreamDescriptor::from_raw(seq.wrapping_mul(DESCRIPTOR_SPREAD)))
    }

    /// Open a pipe; returns its (writer, reader) descriptors.
    fn open_pipe(&mut self) -> Result<(StreamDescriptor, StreamDescriptor), StreamError> {
        let writer = self.issue()?;
        let reader = self.issue()?;
        let pipe = Pipe::new();
        self.slots.insert(writer, Slot::Writer(Arc::clone(&pipe)));
        self.slots.insert(reader, Slot::Reader(pipe));
        tracing::debug!(%writer, %reader, "pipe opened");
        Ok((writer, reader))
    }

    /// A read descriptor that delivers `body` and then ends.
    fn preloaded_reader(&mut self, body: Bytes) -> Result<StreamDescriptor, StreamError> {
        let reader = self.issue()?;
        let pipe = Pipe::new();
        if !body.is_empty()
            && let Some(tx) = lock(&pipe.tx).as_ref()
        {
            let _ = tx.send(body);
        }
        pipe.finish(Termination::Closed);
        self.slots.insert(reader, Slot::Reader(pipe));
        Ok(reader)
    }

    fn record_termination(&mut self, sd: StreamDescriptor, how: Termination) {
        if self.terminations.insert(sd, how).is_none() {
            self.termination_order.push_back(sd);
        }
        while self.termination_order.len() > TERMINATION_LOG_CAPACITY {
            if let Some(oldest) = self.termination_order.pop_front() {
                self.terminations.remove(&oldest);
            }
        }
    }

    fn object(&self, bucket_id: &str, file_name: &str) -> Result<&StoredObject, StorageError> {
        match self.objects.get(&key(bucket_id, file_name)) {
            Some(StoredEntry::Live(object)) => Ok(object),
            Some(StoredEntry::Deleted) => Err(StorageError::ContentDeleted),
            None => Err(StorageError::ContentNotFound),
        }
    }

    fn object_mut(
        &mut self,
        bucket_id: &str,
        file_name: &str,
    ) -> Result<&mut StoredObject, StorageError> {
        match self.objects.get_mut(&key(bucket_id, file_name)) {
            Some(StoredEntry::Live(object)) => Ok(object),
            Some(StoredEntry::Deleted) => Err(StorageError::ContentDeleted),
            None => Err(StorageError::ContentNotFound),
        }
    }
}

struct Inner {
    state: Mutex<State>,
    limits: Limits,
    max_object_size: usize,
    upstream: Arc<dyn Upstream>,
}

/// In-process [`HostChannel`]. Cloning shares the same host.
#[derive(Clone)]
pub struct MemoryHost {
    inner: Arc<Inner>,
}

impl fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("MemoryHost")
            .field("limits", &self.inner.limits)
            .field("open_descriptors", &state.slots.len())
            .field("objects", &state.objects.len())
            .finish_non_exhaustive()
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryHost {
    /// A host with default limits, an echoing upstream and an empty
    /// `GET http://localhost/` client request.
    pub fn new() -> Self {
        MemoryHostBuilder::new().build()
    }

    pub fn builder() -> MemoryHostBuilder {
        MemoryHostBuilder::new()
    }

    /// This host as a shared channel, for [`EdgeClient::new`](crate::EdgeClient::new).
    pub fn shared(&self) -> Arc<dyn HostChannel> {
        Arc::new(self.clone())
    }

    pub fn limits(&self) -> &Limits {
        &self.inner.limits
    }

    fn state(&self) -> MutexGuard<'_, State> {
        lock(&self.inner.state)
    }

    /// How `sd` ended, if it did. Only the most recent terminations are
    /// remembered.
    pub fn termination(&self, sd: StreamDescriptor) -> Option<Termination> {
        self.state().terminations.get(&sd).copied()
    }

    /// Number of descriptors currently open on either side.
    pub fn open_descriptors(&self) -> usize {
        self.state().slots.len()
    }

    /// Number of exchanges whose response nobody has collected yet.
    pub fn pending_responses(&self) -> usize {
        let state = self.state();
        state.pending_fetch.len() + state.pending_storage.len()
    }

    /// Store an object without attributes, replacing any previous one.
    pub fn put_object(&self, bucket_id: &str, file_name: &str, body: impl Into<Bytes>) {
        self.state().objects.insert(
            key(bucket_id, file_name),
            StoredEntry::Live(StoredObject {
                body: body.into(),
                attributes: FileAttributes::default(),
            }),
        );
    }

    /// Contents of a stored object; `None` if missing or deleted.
    pub fn object(&self, bucket_id: &str, file_name: &str) -> Option<Bytes> {
        self.state()
            .object(bucket_id, file_name)
            .ok()
            .map(|o| o.body.clone())
    }

    /// Collect the response the function sent to its client.
    ///
    /// Waits until the function closes or abandons the body stream.
    pub async fn client_response(&self) -> Option<RecordedResponse> {
        let (head, writer, reader) = {
            let mut state = self.state();
            let r = state.client_response.take()?;
            (r.head, r.writer, r.reader)
        };
        let mut body = ReadStream::from_descriptor(reader, self.shared());
        let mut buf = BytesMut::new();
        while let Ok(Some(chunk)) = body.read_chunk().await {
            buf.extend_from_slice(&chunk);
        }
        let _ = body.close().await;
        Some(RecordedResponse {
            head,
            body: buf.freeze(),
            termination: self.termination(writer),
        })
    }

    fn slot_pipe(&self, sd: StreamDescriptor) -> Result<(bool, Arc<Pipe>), StreamError> {
        match self.state().slots.get(&sd) {
            Some(Slot::Writer(p)) => Ok((true, Arc::clone(p))),
            Some(Slot::Reader(p)) => Ok((false, Arc::clone(p))),
            None => Err(StreamError::StreamNotFound),
        }
    }

    fn end_slot(&self, sd: StreamDescriptor, how: Termination) -> Result<(), StreamError> {
        let slot = {
            let mut state = self.state();
            let slot = state.slots.remove(&sd).ok_or(StreamError::StreamNotFound)?;
            state.record_termination(sd, how);
            slot
        };
        match slot {
            Slot::Writer(pipe) => pipe.finish(how),
            Slot::Reader(pipe) => pipe.reader_gone.store(true, Ordering::SeqCst),
        }
        tracing::debug!(%sd, ?how, "descriptor ended");
        Ok(())
    }

    /// Release the response body of an exchange nobody waits for anymore.
    fn discard_body(&self, body: Option<StreamDescriptor>) {
        if let Some(sd) = body {
            tracing::debug!(%sd, "discarding uncollected response body");
            let _ = self.end_slot(sd, Termination::Released);
        }
    }

    fn spawn<F>(&self, task: F) -> bool
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        match tokio::runtime::Handle::try_current() {
            Ok(rt) => {
                rt.spawn(task);
                true
            }
            Err(_) => {
                tracing::warn!("memory host used outside a tokio runtime");
                false
            }
        }
    }

    fn storage_head(headers: HttpHeaders) -> StorageHead {
        StorageHead {
            headers,
            body: None,
        }
    }
}

async fn upload(body: &mut ReadStream, max: usize) -> Result<Bytes, StorageError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = body.read_chunk().await? {
        if buf.len() + chunk.len() > max {
            return Err(StorageError::ResourceLimit);
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

#[async_trait]
impl HostChannel for MemoryHost {
    async fn stream_write(&self, sd: StreamDescriptor, chunk: Bytes) -> Result<(), StreamError> {
        let (is_writer, pipe) = self.slot_pipe(sd)?;
        if !is_writer {
            return Err(StreamError::WriteOnReadStream);
        }
        if chunk.len() > self.inner.limits.max_chunk_size {
            return Err(StreamError::ChunkTooLarge);
        }
        if pipe.reader_gone.load(Ordering::SeqCst) {
            return Err(StreamError::ChannelClosed);
        }
        let tx = lock(&pipe.tx);
        let tx = tx.as_ref().ok_or(StreamError::StreamClosed)?;
        tx.send(chunk).map_err(|_| StreamError::ChannelClosed)
    }

    async fn stream_read(&self, sd: StreamDescriptor) -> Result<Bytes, StreamError> {
        let (is_writer, pipe) = self.slot_pipe(sd)?;
        if is_writer {
            return Err(StreamError::ReadOnWriteStream);
        }
        if pipe.is_broken() {
            return Err(StreamError::ChannelClosed);
        }
        let next = pipe.rx.lock().await.recv().await;
        match next {
            Some(_) if pipe.is_broken() => Err(StreamError::ChannelClosed),
            Some(chunk) => Ok(chunk),
            None if pipe.end() == Some(Termination::Closed) => Err(StreamError::EndOfStream),
            None => Err(StreamError::ChannelClosed),
        }
    }

    async fn stream_close(&self, sd: StreamDescriptor) -> Result<(), StreamError> {
        self.end_slot(sd, Termination::Closed)
    }

    async fn stream_abort(&self, sd: StreamDescriptor) -> Result<(), StreamError> {
        let (is_writer, _) = self.slot_pipe(sd)?;
        if !is_writer {
            return Err(StreamError::WriteOnReadStream);
        }
        self.end_slot(sd, Termination::Aborted)
    }

    fn stream_release(&self, sd: StreamDescriptor) {
        let _ = self.end_slot(sd, Termination::Released);
    }

    fn pending_release(&self, sd: StreamDescriptor) {
        let (fetch, storage) = {
            let mut state = self.state();
            (
                state.pending_fetch.remove(&sd),
                state.pending_storage.remove(&sd),
            )
        };
        // A response that already arrived sits in the channel with its body.
        if let Some(Ok(Ok(head))) = fetch.map(|mut rx| rx.try_recv()) {
            self.discard_body(Some(head.body));
        }
        if let Some(Ok(Ok(head))) = storage.map(|mut rx| rx.try_recv()) {
            self.discard_body(head.body);
        }
        tracing::debug!(%sd, "pending response released");
    }

    async fn fetch_send_streaming(&self, request: &HttpFetch) -> Result<StreamDescriptor, HttpError> {
        let (tx, rx) = oneshot::channel();
        let (writer, reader) = {
            let mut state = self.state();
            let (writer, reader) = state.open_pipe()?;
            state.pending_fetch.insert(writer, rx);
            (writer, reader)
        };

        let host = self.clone();
        let upstream = Arc::clone(&self.inner.upstream);
        let request = request.clone();
        let spawned = self.spawn(async move {
            let body = ReadStream::from_descriptor(reader, host.shared());
            let outcome = match upstream.handle(request, body).await {
                Ok(reply) => validate_status(reply.status).and_then(|status| {
                    let body = host.state().preloaded_reader(reply.body)?;
                    Ok(FetchHead {
                        status,
                        headers: reply.headers,
                        body,
                    })
                }),
                Err(e) => Err(e),
            };
            if let Err(Ok(head)) = tx.send(outcome) {
                host.discard_body(Some(head.body));
            }
        });
        if !spawned {
            self.state().pending_fetch.remove(&writer);
            let _ = self.end_slot(reader, Termination::Released);
            let _ = self.end_slot(writer, Termination::Released);
            return Err(HttpError::SystemError);
        }
        Ok(writer)
    }

    async fn fetch_get_response(&self, sd: StreamDescriptor) -> Result<FetchHead, HttpError> {
        let rx = self
            .state()
            .pending_fetch
            .remove(&sd)
            .ok_or(HttpError::FetchResponseNotFound)?;
        rx.await.unwrap_or(Err(HttpError::ChannelClosed))
    }

    async fn storage_put_streaming(
        &self,
        bucket_id: &str,
        file_name: &str,
        properties: &str,
    ) -> Result<StreamDescriptor, StorageError> {
        validate_location(bucket_id, file_name)?;
        let properties = parse_properties(properties)?;
        let (tx, rx) = oneshot::channel();
        let (writer, reader) = {
            let mut state = self.state();
            let (writer, reader) = state.open_pipe()?;
            state.pending_storage.insert(writer, rx);
            (writer, reader)
        };

        let host = self.clone();
        let object_key = key(bucket_id, file_name);
        let attributes = FileAttributes {
            properties: (!properties.is_empty()).then_some(properties),
            default_version: None,
        };
        let max = self.inner.max_object_size;
        let spawned = self.spawn(async move {
            let mut body = ReadStream::from_descriptor(reader, host.shared());
            let uploaded = upload(&mut body, max).await;
            let _ = body.close().await;
            let outcome = match uploaded {
                Ok(bytes) if bytes.is_empty() => Err(StorageError::EmptyContent),
                Ok(bytes) => {
                    let mut headers = HttpHeaders::new();
                    headers.set("content-length", bytes.len().to_string());
                    host.state().objects.insert(
                        object_key,
                        StoredEntry::Live(StoredObject {
                            body: bytes,
                            attributes,
                        }),
                    );
                    Ok(MemoryHost::storage_head(headers))
                }
                Err(e) => Err(e),
            };
            if let Err(Ok(head)) = tx.send(outcome) {
                host.discard_body(head.body);
            }
        });
        if !spawned {
            self.state().pending_storage.remove(&writer);
            let _ = self.end_slot(reader, Termination::Released);
            let _ = self.end_slot(writer, Termination::Released);
            return Err(StorageError::SystemError);
        }
        Ok(writer)
    }

    async fn storage_get_response(&self, sd: StreamDescriptor) -> Result<StorageHead, StorageError> {
        let rx = self
            .state()
            .pending_storage
            .remove(&sd)
            .ok_or(StorageError::ResponseNotFound)?;
        rx.await.unwrap_or(Err(StorageError::ChannelClosed))
    }

    async fn storage_get_streaming(
        &self,
        bucket_id: &str,
        file_name: &str,
    ) -> Result<StorageHead, StorageError> {
        validate_location(bucket_id, file_name)?;
        let mut state = self.state();
        let object = state.object(bucket_id, file_name)?;
        let body = object.body.clone();
        let mut headers = HttpHeaders::new();
        headers.set("content-length", body.len().to_string());
        if let Some(properties) = &object.attributes.properties {
            headers.set("x-properties", format_properties(properties));
        }
        if let Some(version) = &object.attributes.default_version {
            headers.set("x-default-version", version.as_str());
        }
        let body = state.preloaded_reader(body)?;
        Ok(StorageHead {
            headers,
            body: Some(body),
        })
    }

    async fn storage_delete(
        &self,
        bucket_id: &str,
        file_name: &str,
    ) -> Result<StorageHead, StorageError> {
        validate_location(bucket_id, file_name)?;
        let mut state = self.state();
        state.object(bucket_id, file_name)?;
        state
            .objects
            .insert(key(bucket_id, file_name), StoredEntry::Deleted);
        Ok(Self::storage_head(HttpHeaders::new()))
    }

    async fn storage_get_attributes(
        &self,
        bucket_id: &str,
        file_name: &str,
    ) -> Result<FileAttributes, StorageError> {
        validate_location(bucket_id, file_name)?;
        let state = self.state();
        let attributes = &state.object(bucket_id, file_name)?.attributes;
        if attributes.is_empty() {
            return Err(StorageError::MissingAttributes);
        }
        Ok(attributes.clone())
    }

    async fn storage_set_attributes(
        &self,
        bucket_id: &str,
        file_name: &str,
        attributes: &FileAttributes,
    ) -> Result<StorageHead, StorageError> {
        validate_location(bucket_id, file_name)?;
        attributes.validate()?;
        let mut state = self.state();
        state.object_mut(bucket_id, file_name)?.attributes = attributes.clone();
        Ok(Self::storage_head(HttpHeaders::new()))
    }

    async fn request_head(&self) -> Result<HttpRequest, HttpError> {
        Ok(self.state().client_request.clone())
    }

    async fn request_open_read_stream(&self) -> Result<StreamDescriptor, HttpError> {
        let mut state = self.state();
        let body = state.client_body.take().ok_or(HttpError::SystemError)?;
        Ok(state.preloaded_reader(body)?)
    }

    async fn response_send_streaming(
        &self,
        response: &HttpResponse,
    ) -> Result<StreamDescriptor, HttpError> {
        validate_status(response.status)?;
        let mut state = self.state();
        if state.client_response.is_some() {
            return Err(HttpError::SystemError);
        }
        let (writer, reader) = state.open_pipe()?;
        state.client_response = Some(ClientResponse {
            head: response.clone(),
            writer,
            reader,
        });
        Ok(writer)
    }
}

/// Builder for [`MemoryHost`].
pub struct MemoryHostBuilder {
    limits: Limits,
    max_object_size: usize,
    upstream: Arc<dyn Upstream>,
    client_request: HttpRequest,
    client_body: Bytes,
}

impl MemoryHostBuilder {
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
            max_object_size: DEFAULT_MAX_OBJECT_SIZE,
            upstream: Arc::new(EchoUpstream),
            client_request: HttpRequest::new(HttpMethod::Get, "http://localhost/"),
            client_body: Bytes::new(),
        }
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Largest object the store accepts through a streaming upload.
    pub fn max_object_size(mut self, size: usize) -> Self {
        self.max_object_size = size;
        self
    }

    /// Remote server answering fetches. Defaults to echoing the request body.
    pub fn upstream(mut self, upstream: impl Upstream + 'static) -> Self {
        self.upstream = Arc::new(upstream);
        self
    }

    /// Client request that triggered the function, with its body.
    pub fn client_request(mut self, request: HttpRequest, body: impl Into<Bytes>) -> Self {
        self.client_request = request;
        self.client_body = body.into();
        self
    }

    pub fn build(self) -> MemoryHost {
        let state = State {
            client_request: self.client_request,
            client_body: Some(self.client_body),
            ..State::default()
        };
        MemoryHost {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                limits: self.limits,
                max_object_size: self.max_object_size,
                upstream: self.upstream,
            }),
        }
    }
}

impl Default for MemoryHostBuilder {
    fn default() -> Self {
        Self::new()
    }
}
