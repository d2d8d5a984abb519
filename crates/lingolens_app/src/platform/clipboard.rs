use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use arboard::{Clipboard, ImageData};
use lingolens_core::{ClipboardItem, ImageCandidate, Msg};
use lingolens_logging::{lens_debug, lens_info, lens_warn};

pub const POLL_INTERVAL: Duration = Duration::from_millis(400);

/// Global paste subscription. The watcher thread runs while this value lives
/// and is stopped and joined when it is dropped.
pub struct PasteListener {
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl PasteListener {
    pub fn subscribe(msg_tx: mpsc::Sender<Msg>, interval: Duration) -> Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();

        let worker = {
            let stop = stop.clone();
            thread::Builder::new()
                .name("paste-listener".to_string())
                .spawn(move || {
                    let mut clipboard = match Clipboard::new() {
                        Ok(clipboard) => {
                            let _ = ready_tx.send(Ok(()));
                            clipboard
                        }
                        Err(err) => {
                            let _ = ready_tx.send(Err(err.to_string()));
                            return;
                        }
                    };
                    // Whatever is on the clipboard at subscribe time was not pasted by the user.
                    let mut last = read_clipboard(&mut clipboard).snapshot;
                    while !stop.load(Ordering::Relaxed) {
                        thread::sleep(interval);
                        let reading = read_clipboard(&mut clipboard);
                        if reading.snapshot == last {
                            continue;
                        }
                        last = reading.snapshot.clone();
                        if let Some(items) = paste_items(reading) {
                            if msg_tx.send(Msg::Pasted(items)).is_err() {
                                break;
                            }
                        }
                    }
                    lens_debug!("Paste listener stopped");
                })
                .context("Failed to start paste listener")?
        };

        match ready_rx.recv() {
            Ok(Ok(())) => {
                lens_info!("Paste listener subscribed");
                Ok(Self {
                    stop,
                    worker: Some(worker),
                })
            }
            Ok(Err(reason)) => {
                let _ = worker.join();
                Err(anyhow!("Clipboard unavailable: {reason}"))
            }
            Err(_) => {
                let _ = worker.join();
                Err(anyhow!("Paste listener exited during startup"))
            }
        }
    }
}

impl Drop for PasteListener {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        lens_info!("Paste listener unsubscribed");
    }
}

/// Cheap fingerprint of the clipboard contents, used to spot new pastes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Snapshot {
    Empty,
    Text(u64),
    Image { width: usize, height: usize, digest: u64 },
}

/// One read of the clipboard. The pasted image comes from the same read as
/// its fingerprint.
struct Reading {
    snapshot: Snapshot,
    image: Option<ImageData<'static>>,
}

fn read_clipboard(clipboard: &mut Clipboard) -> Reading {
    if let Ok(image) = clipboard.get_image() {
        return Reading {
            snapshot: Snapshot::Image {
                width: image.width,
                height: image.height,
                digest: digest(&image.bytes),
            },
            image: Some(image),
        };
    }
    let snapshot = match clipboard.get_text() {
        Ok(text) => Snapshot::Text(digest(text.as_bytes())),
        Err(_) => Snapshot::Empty,
    };
    Reading {
        snapshot,
        image: None,
    }
}

fn digest(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

fn paste_items(reading: Reading) -> Option<Vec<ClipboardItem>> {
    if let Some(image) = reading.image {
        return Some(vec![image_item(image)]);
    }
    match reading.snapshot {
        Snapshot::Text(_) => Some(vec![ClipboardItem::text()]),
        Snapshot::Empty | Snapshot::Image { .. } => None,
    }
}

fn image_item(image: ImageData<'static>) -> ClipboardItem {
    match encode_png(image.width, image.height, image.bytes.into_owned()) {
        Ok(png) => ClipboardItem::image(ImageCandidate::new("clipboard.png", "image/png", png)),
        Err(err) => {
            lens_warn!("Could not read pasted image: {}", err);
            ClipboardItem {
                media_type: "image/png".to_string(),
                candidate: None,
            }
        }
    }
}

/// Encodes raw RGBA pixels as PNG.
pub fn encode_png(width: usize, height: usize, rgba: Vec<u8>) -> Result<Vec<u8>> {
    let width = u32::try_from(width).context("image too wide")?;
    let height = u32::try_from(height).context("image too tall")?;
    let image = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| anyhow!("pixel buffer does not match {width}x{height}"))?;
    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, image::ImageFormat::Png)
        .context("PNG encoding failed")?;
    Ok(png.into_inner())
}
