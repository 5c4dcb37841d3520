//! Boot a configured engine against a real frame buffer

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embedded_hal_async::delay::DelayNs;
use vellum_core::surface::ON;
use vellum_core::widgets::Pixel;
use vellum_core::{
    Activity, ActivityControl, BoxStyle, CallbackFault, CallbackResult, Clock, ColumnView,
    Element, EventControl, Payload, Size, View,
};
use vellum_display::{GraphicsSurface, MonoFrameBuffer, PageSink, WIDTH};
use vellum_runtime::{parse_config, run_with_mailbox, Mailbox};

struct Panel {
    flushes: Rc<Cell<u32>>,
}

impl PageSink for Panel {
    type Error = Infallible;

    fn write_page(&mut self, page: u8, _data: &[u8; WIDTH]) -> Result<(), Infallible> {
        if page == 0 {
            self.flushes.set(self.flushes.get() + 1);
        }
        Ok(())
    }
}

struct Ticking(Cell<u64>);

impl Clock for Ticking {
    fn now_ms(&self) -> u64 {
        let now = self.0.get();
        self.0.set(now + 1);
        now
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    async fn delay_ns(&mut self, _ns: u32) {}
}

/// Two dots stacked in a bordered column
struct Home;

impl Activity for Home {
    fn view(&mut self, _space: Size) -> Box<dyn View> {
        let style = BoxStyle::new(Size::new(20, 20)).with_border(1, ON);
        Box::new(
            ColumnView::new(style)
                .with(Element::drawable(Pixel::new(ON)))
                .with(Element::drawable(Pixel::new(ON))),
        )
    }
}

/// Leaves for home on the first click
struct Splash;

impl Activity for Splash {
    fn view(&mut self, _space: Size) -> Box<dyn View> {
        Box::new(ColumnView::new(BoxStyle::new(Size::new(1, 1))))
    }
}

#[test]
fn test_boot_navigate_and_stop() {
    let config = parse_config(
        "start = \"splash\"\n[engine]\ntarget_fps = 5\nhousekeeping = true\n",
    )
    .unwrap();
    let mut engine = config.build_engine().unwrap();

    engine
        .register("splash", |control: ActivityControl, events: EventControl| {
            events
                .on("click", move |_: &Payload| -> CallbackResult {
                    control
                        .change("home")
                        .map_err(|_| CallbackFault::Failed("queue full"))
                })
                .unwrap();
            Splash
        })
        .unwrap();
    engine.register("home", |_, _| Home).unwrap();
    config.bootstrap(&mut engine).unwrap();

    let stop = engine.stop_handle();
    engine.set_housekeeping(move || stop.stop());

    let mailbox: Mailbox<CriticalSectionRawMutex, 4> = Mailbox::new();
    mailbox.emit("click", ()).unwrap();

    let flushes = Rc::new(Cell::new(0));
    let mut surface = GraphicsSurface::new(MonoFrameBuffer::new(Panel {
        flushes: flushes.clone(),
    }));

    block_on(run_with_mailbox(
        &mut engine,
        &mut surface,
        &Ticking(Cell::new(0)),
        &mut NoDelay,
        &mailbox,
    ))
    .unwrap();

    // push splash, click, change to home, then two idle frames
    assert_eq!(engine.stats().frames, 5);
    assert_eq!(engine.stats().transitions, 2);
    assert_eq!(flushes.get(), 5);
    assert_eq!(engine.depth(), 0);

    // Last frame: home's 22x22 border with both dots stacked inside
    let fb = surface.target();
    assert!(fb.get(0, 0));
    assert!(fb.get(21, 21));
    assert!(fb.get(1, 1));
    assert!(fb.get(1, 2));
    assert!(!fb.get(1, 3));
}
