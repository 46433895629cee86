use crate::frame_loop::MessagePump;
use crate::frame_loop::PumpEvent;
use windows::Win32::UI::WindowsAndMessaging::*;

/// Non-blocking pump over the calling thread's message queue.
#[derive(Debug, Default)]
pub struct Win32MessagePump;

impl MessagePump for Win32MessagePump {
    fn pump(&mut self) -> PumpEvent {
        let mut message = MSG::default();

        if !unsafe { PeekMessageW(&mut message, None, 0, 0, PM_REMOVE) }.as_bool() {
            return PumpEvent::Empty;
        }

        if message.message == WM_QUIT {
            return PumpEvent::Quit(message.wParam.0 as i32);
        }

        unsafe {
            _ = TranslateMessage(&message);
            DispatchMessageW(&message);
        }
        PumpEvent::Dispatched
    }
}
