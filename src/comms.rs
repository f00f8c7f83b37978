/// Frame handoff between the real-time world and the video unit.

use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::constants::video::FRAME_PIXELS;
use crate::render::RenderTarget;
use crate::FrameBuffer;

/// Make a link between the realtime world and the video unit.
///
/// The main thread (real-time) requests frames; the video thread
/// renders into a shared buffer and blocks between frames.
pub fn new_frame_comms() -> (FrameSender, FrameRequester) {
    let frame_buffer = Arc::new(Mutex::new(vec![0; FRAME_PIXELS].into_boxed_slice()));
    let (sync_tx, sync_rx) = bounded(1);
    let (data_tx, data_rx) = bounded(1);
    (
        FrameSender {
            frame_buffer: frame_buffer.clone(),
            tx:           data_tx,
            rx:           sync_rx,
        },
        FrameRequester {
            frame_buffer: frame_buffer,
            tx:           sync_tx,
            rx:           data_rx,
        },
    )
}

pub struct FrameRequester {
    frame_buffer: Arc<Mutex<FrameBuffer>>,

    tx: Sender<()>,
    rx: Receiver<()>,
}

impl FrameRequester {
    /// Wait for the video thread to complete a frame, then copy it out.
    ///
    /// Lets the video thread continue once the copy is done.
    pub fn get_frame(&mut self, buffer: &mut [u16]) {
        self.rx.recv().expect("couldn't get from video thread");
        {
            let frame = self.frame_buffer.lock();
            buffer.copy_from_slice(&frame);
        }
        self.tx.send(()).expect("couldn't send to video thread");
    }
}

pub struct FrameSender {
    frame_buffer: Arc<Mutex<FrameBuffer>>,

    tx: Sender<()>,
    rx: Receiver<()>,
}

impl FrameSender {
    /// Clone the frame buffer for the renderer to write into.
    pub fn render_target(&self) -> RenderTarget {
        self.frame_buffer.clone()
    }

    /// Indicate to the main thread that the frame is complete, then
    /// block until it requests the next one.
    pub fn sync_frame(&mut self) {
        self.tx.send(()).expect("couldn't send to main thread");
        self.rx.recv().expect("couldn't get from main thread");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::video::FRAME_PIXELS;
    use crate::render::ProceduralRenderer;
    use crate::video::{Ppu, Signal};
    use crate::Renderer;

    #[test]
    fn frames_cross_threads() {
        let (mut sender, mut requester) = new_frame_comms();
        let target = sender.render_target();

        let video_thread = std::thread::spawn(move || {
            let mut ppu = Ppu::new(ProceduralRenderer::new(target));
            ppu.set_display_control(0x0003);
            ppu.set_bitmap_pixel(0, 0, 0x7FFF);
            for _ in 0..2 {
                loop {
                    let (signal, _) = ppu.step();
                    if signal == Signal::VBlank {
                        break;
                    }
                }
                sender.sync_frame();
            }
        });

        let mut frame = vec![0; FRAME_PIXELS];
        for _ in 0..2 {
            requester.get_frame(&mut frame);
            assert_eq!(frame[0], 0x7FFF);
        }
        video_thread.join().unwrap();
    }
}
