//! Android storage via JNI.
//!
//! API 29+ writes go through `MediaStore`: a record is inserted with
//! `is_pending = 1`, its file descriptor is opened for writing, and the flag
//! is cleared once every byte is in. Older releases copy into the public
//! `DCIM` / `Movies` directories and broadcast `MEDIA_SCANNER_SCAN_FILE`.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::os::fd::FromRawFd;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jni::objects::{GlobalRef, JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};

use album_core::store::require_root;
use album_core::{
    AlbumConfig, AlbumError, AlbumResult, BoxedStore, IndexedStore, LegacyStore, MediaIndex,
    MediaKind, MediaRecord, MediaScanner, PendingMedia, StorageMode,
};

use crate::StorageHost;

/// Local references a single storage call may create.
const LOCAL_FRAME_CAPACITY: i32 = 32;

const ACTION_MEDIA_SCANNER_SCAN_FILE: &str = "android.intent.action.MEDIA_SCANNER_SCAN_FILE";

// MediaStore.MediaColumns
const COLUMN_DISPLAY_NAME: &str = "_display_name";
const COLUMN_MIME_TYPE: &str = "mime_type";
const COLUMN_RELATIVE_PATH: &str = "relative_path";
const COLUMN_IS_PENDING: &str = "is_pending";

/// JVM handle plus the application context, obtained once from the NDK glue.
pub struct AndroidContext {
    vm: JavaVM,
    context: GlobalRef,
}

impl fmt::Debug for AndroidContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AndroidContext").finish_non_exhaustive()
    }
}

impl AndroidContext {
    /// Reads the `JavaVM*` and context `jobject` published by the activity.
    pub fn from_ndk() -> AlbumResult<Self> {
        let ctx = ndk_context::android_context();
        // SAFETY: the pointer is the JavaVM set by the NDK glue and lives
        // for the whole process.
        let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
            .map_err(|e| AlbumError::platform(format!("failed to obtain JavaVM: {e}")))?;

        let ptr = ctx.context();
        if ptr.is_null() {
            return Err(AlbumError::platform("Android context is null"));
        }

        let context = {
            let env = vm
                .attach_current_thread()
                .map_err(|e| AlbumError::platform(format!("failed to attach JNI thread: {e}")))?;
            // SAFETY: the NDK keeps this jobject valid while the activity lives;
            // the global ref below outlives any local use.
            let obj = unsafe { JObject::from_raw(ptr.cast()) };
            env.new_global_ref(&obj)
                .map_err(|e| AlbumError::platform(format!("failed to pin context: {e}")))?
        };

        Ok(Self { vm, context })
    }

    /// Runs `f` on an attached thread inside its own local reference frame.
    fn with_env<T>(
        &self,
        what: &str,
        f: impl FnOnce(&mut JNIEnv) -> jni::errors::Result<T>,
    ) -> AlbumResult<T> {
        let mut env = self
            .vm
            .attach_current_thread()
            .map_err(|e| AlbumError::platform(format!("failed to attach JNI thread: {e}")))?;
        let result = env.with_local_frame(LOCAL_FRAME_CAPACITY, f);
        result.map_err(|e| take_exception(&mut env, what, e))
    }

    /// `Build.VERSION.SDK_INT`.
    pub fn sdk_int(&self) -> AlbumResult<i32> {
        self.with_env("Build.VERSION.SDK_INT", |env| {
            env.get_static_field("android/os/Build$VERSION", "SDK_INT", "I")?
                .i()
        })
    }

    /// `Environment.getExternalStorageDirectory()`, the legacy storage root.
    pub fn external_storage_root(&self) -> AlbumResult<Option<PathBuf>> {
        self.with_env("Environment.getExternalStorageDirectory", |env| {
            let dir = env
                .call_static_method(
                    "android/os/Environment",
                    "getExternalStorageDirectory",
                    "()Ljava/io/File;",
                    &[],
                )?
                .l()?;
            if dir.is_null() {
                return Ok(None);
            }
            let path = env
                .call_method(&dir, "getAbsolutePath", "()Ljava/lang/String;", &[])?
                .l()?;
            let path: String = env.get_string(&JString::from(path))?.into();
            Ok(Some(PathBuf::from(path)))
        })
    }

    fn content_resolver<'local>(
        &self,
        env: &mut JNIEnv<'local>,
    ) -> jni::errors::Result<JObject<'local>> {
        env.call_method(
            &self.context,
            "getContentResolver",
            "()Landroid/content/ContentResolver;",
            &[],
        )?
        .l()
    }
}

/// Describes and clears a pending Java exception, keeping its text.
fn take_exception(env: &mut JNIEnv, what: &str, e: jni::errors::Error) -> AlbumError {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let throwable = env.exception_occurred().ok();
        let _ = env.exception_clear();
        if let Some(throwable) = throwable {
            let text = env
                .call_method(&throwable, "toString", "()Ljava/lang/String;", &[])
                .and_then(|v| v.l())
                .and_then(|s| env.get_string(&JString::from(s)).map(String::from));
            if let Ok(text) = text {
                return AlbumError::platform(format!("{what}: {text}"));
            }
        }
    }
    AlbumError::platform(format!("{what}: {e}"))
}

fn collection_uri<'local>(
    env: &mut JNIEnv<'local>,
    kind: MediaKind,
) -> jni::errors::Result<JObject<'local>> {
    let class = match kind {
        MediaKind::Image => "android/provider/MediaStore$Images$Media",
        MediaKind::Video => "android/provider/MediaStore$Video$Media",
    };
    env.get_static_field(class, "EXTERNAL_CONTENT_URI", "Landroid/net/Uri;")?
        .l()
}

fn parse_uri<'local>(env: &mut JNIEnv<'local>, uri: &str) -> jni::errors::Result<JObject<'local>> {
    let text = env.new_string(uri)?;
    env.call_static_method(
        "android/net/Uri",
        "parse",
        "(Ljava/lang/String;)Landroid/net/Uri;",
        &[JValue::Object(&text)],
    )?
    .l()
}

fn uri_string(env: &mut JNIEnv, uri: &JObject) -> jni::errors::Result<String> {
    let text = env
        .call_method(uri, "toString", "()Ljava/lang/String;", &[])?
        .l()?;
    Ok(env.get_string(&JString::from(text))?.into())
}

fn put_string(
    env: &mut JNIEnv,
    values: &JObject,
    key: &str,
    value: &str,
) -> jni::errors::Result<()> {
    let key = env.new_string(key)?;
    let value = env.new_string(value)?;
    env.call_method(
        values,
        "put",
        "(Ljava/lang/String;Ljava/lang/String;)V",
        &[JValue::Object(&key), JValue::Object(&value)],
    )?;
    Ok(())
}

fn put_int(env: &mut JNIEnv, values: &JObject, key: &str, value: i32) -> jni::errors::Result<()> {
    let key = env.new_string(key)?;
    let boxed = env
        .call_static_method(
            "java/lang/Integer",
            "valueOf",
            "(I)Ljava/lang/Integer;",
            &[JValue::Int(value)],
        )?
        .l()?;
    env.call_method(
        values,
        "put",
        "(Ljava/lang/String;Ljava/lang/Integer;)V",
        &[JValue::Object(&key), JValue::Object(&boxed)],
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// MediaStore
// ---------------------------------------------------------------------------

/// `MediaIndex` backed by `ContentResolver` + `MediaStore`.
#[derive(Debug)]
pub struct MediaStoreIndex {
    ctx: Arc<AndroidContext>,
}

impl MediaStoreIndex {
    pub fn new(ctx: Arc<AndroidContext>) -> Self {
        Self { ctx }
    }
}

impl MediaIndex for MediaStoreIndex {
    fn insert_pending(&self, media: &PendingMedia) -> AlbumResult<MediaRecord> {
        let uri = self.ctx.with_env("ContentResolver.insert", |env| {
            let values = env.new_object("android/content/ContentValues", "()V", &[])?;
            put_string(env, &values, COLUMN_DISPLAY_NAME, &media.display_name)?;
            put_string(env, &values, COLUMN_MIME_TYPE, &media.mime_type)?;
            put_string(env, &values, COLUMN_RELATIVE_PATH, &media.relative_path)?;
            put_int(env, &values, COLUMN_IS_PENDING, 1)?;

            let collection = collection_uri(env, media.kind)?;
            let resolver = self.ctx.content_resolver(env)?;
            let inserted = env
                .call_method(
                    &resolver,
                    "insert",
                    "(Landroid/net/Uri;Landroid/content/ContentValues;)Landroid/net/Uri;",
                    &[JValue::Object(&collection), JValue::Object(&values)],
                )?
                .l()?;
            if inserted.is_null() {
                return Ok(None);
            }
            uri_string(env, &inserted).map(Some)
        })?;

        let uri = uri.ok_or_else(|| {
            AlbumError::platform(format!(
                "MediaStore refused {} in {}",
                media.display_name, media.relative_path
            ))
        })?;
        tracing::debug!(uri = %uri, mime = %media.mime_type, "pending media record inserted");

        Ok(MediaRecord {
            uri,
            kind: media.kind,
        })
    }

    fn open_writer(&self, record: &MediaRecord) -> AlbumResult<Box<dyn Write + Send>> {
        let fd = self.ctx.with_env("ContentResolver.openFileDescriptor", |env| {
            let uri = parse_uri(env, &record.uri)?;
            let mode = env.new_string("w")?;
            let resolver = self.ctx.content_resolver(env)?;
            let pfd = env
                .call_method(
                    &resolver,
                    "openFileDescriptor",
                    "(Landroid/net/Uri;Ljava/lang/String;)Landroid/os/ParcelFileDescriptor;",
                    &[JValue::Object(&uri), JValue::Object(&mode)],
                )?
                .l()?;
            if pfd.is_null() {
                return Ok(None);
            }
            env.call_method(&pfd, "detachFd", "()I", &[])?.i().map(Some)
        })?;

        let fd = fd.ok_or_else(|| {
            AlbumError::platform(format!("no file descriptor for {}", record.uri))
        })?;
        // SAFETY: `detachFd` hands ownership of the descriptor to us; the
        // `File` closes it on drop.
        let file = unsafe { File::from_raw_fd(fd) };
        Ok(Box::new(file))
    }

    fn publish(&self, record: &MediaRecord) -> AlbumResult<()> {
        self.ctx.with_env("ContentResolver.update", |env| {
            let uri = parse_uri(env, &record.uri)?;
            let values = env.new_object("android/content/ContentValues", "()V", &[])?;
            put_int(env, &values, COLUMN_IS_PENDING, 0)?;
            let resolver = self.ctx.content_resolver(env)?;
            let null = JObject::null();
            env.call_method(
                &resolver,
                "update",
                "(Landroid/net/Uri;Landroid/content/ContentValues;Ljava/lang/String;[Ljava/lang/String;)I",
                &[
                    JValue::Object(&uri),
                    JValue::Object(&values),
                    JValue::Object(&null),
                    JValue::Object(&null),
                ],
            )?;
            Ok(())
        })
    }
}

// ---------------------------------------------------------------------------
// Legacy scanner
// ---------------------------------------------------------------------------

/// Tells the media scanner about a new file with a broadcast intent.
#[derive(Debug)]
pub struct BroadcastScanner {
    ctx: Arc<AndroidContext>,
}

impl BroadcastScanner {
    pub fn new(ctx: Arc<AndroidContext>) -> Self {
        Self { ctx }
    }
}

impl MediaScanner for BroadcastScanner {
    fn scan_file(&self, path: &Path) -> AlbumResult<()> {
        let path_text = path.to_string_lossy();
        self.ctx.with_env("Context.sendBroadcast", |env| {
            let path = env.new_string(path_text.as_ref())?;
            let file = env.new_object("java/io/File", "(Ljava/lang/String;)V", &[JValue::Object(&path)])?;
            let uri = env
                .call_static_method(
                    "android/net/Uri",
                    "fromFile",
                    "(Ljava/io/File;)Landroid/net/Uri;",
                    &[JValue::Object(&file)],
                )?
                .l()?;
            let action = env.new_string(ACTION_MEDIA_SCANNER_SCAN_FILE)?;
            let intent = env.new_object(
                "android/content/Intent",
                "(Ljava/lang/String;Landroid/net/Uri;)V",
                &[JValue::Object(&action), JValue::Object(&uri)],
            )?;
            env.call_method(
                &self.ctx.context,
                "sendBroadcast",
                "(Landroid/content/Intent;)V",
                &[JValue::Object(&intent)],
            )?;
            Ok(())
        })?;
        tracing::debug!(path = %path_text, "media scan requested");
        Ok(())
    }
}

/// Builds the Android store for an already resolved mode.
pub fn android_store(
    mode: StorageMode,
    config: &AlbumConfig,
    host: &StorageHost,
) -> AlbumResult<BoxedStore> {
    let ctx = Arc::clone(&host.context);
    match mode {
        StorageMode::Indexed => Ok(Box::new(IndexedStore::new(
            MediaStoreIndex::new(ctx),
            config.collections(),
        ))),
        StorageMode::Legacy => {
            let root = match config.legacy_root.clone() {
                Some(root) => root,
                None => require_root(
                    ctx.external_storage_root()?
                        .or_else(|| host.fallback_root.clone()),
                )?,
            };
            tracing::debug!(root = %root.display(), "legacy album root");
            Ok(Box::new(LegacyStore::new(
                root,
                config.collections(),
                BroadcastScanner::new(ctx),
            )))
        }
    }
}
