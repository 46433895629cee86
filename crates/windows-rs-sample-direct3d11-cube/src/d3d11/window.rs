use crate::config::TemplateConfig;
use crate::error::MyResult;
use eyre::WrapErr;
use tracing::debug;
use tracing::info;
use widestring::U16CString;
use windows::core::*;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Gdi::*;
use windows::Win32::System::LibraryLoader::*;
use windows::Win32::UI::WindowsAndMessaging::*;

/// Per-class message handling. Returning `false` defers to `DefWindowProcW`.
pub trait WindowClass {
    fn handle(window: HWND, message: u32) -> bool;
}

/// The template's window: it never draws through GDI and only cares about
/// being closed.
pub struct TemplateWindow;

impl WindowClass for TemplateWindow {
    fn handle(window: HWND, message: u32) -> bool {
        match message {
            WM_PAINT => {
                // Drawing happens in the frame loop; just validate the region.
                let mut paint = PAINTSTRUCT::default();
                unsafe {
                    let _ = BeginPaint(window, &mut paint);
                    _ = EndPaint(window, &paint);
                }
                true
            }
            WM_DESTROY => {
                unsafe { PostQuitMessage(0) };
                true
            }
            _ => false,
        }
    }
}

extern "system" fn wndproc<W: WindowClass>(
    window: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if W::handle(window, message) {
        LRESULT(0)
    } else {
        unsafe { DefWindowProcW(window, message, wparam, lparam) }
    }
}

pub struct WindowHost {
    hwnd: HWND,
    // Registered class names must outlive every window of the class.
    _class_name: U16CString,
}

impl WindowHost {
    /// Registers the window class, creates an overlapped window whose client
    /// area is `config.client_size`, and shows it.
    pub fn create<W: WindowClass>(config: &TemplateConfig) -> MyResult<Self> {
        let instance = get_handle_to_file_used_to_create_the_calling_process()?;
        let class_name = U16CString::from_str(config.class_name)?;
        let title = U16CString::from_str(config.title)?;

        let window_class = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(wndproc::<W>),
            hInstance: instance.into(),
            hCursor: unsafe { LoadCursorW(None, IDC_ARROW)? },
            hbrBackground: HBRUSH((COLOR_WINDOW.0 + 1) as usize as *mut core::ffi::c_void),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            ..Default::default()
        };
        let atom = unsafe { RegisterClassExW(&window_class) };
        if atom == 0 {
            return Err(Error::from_win32()).wrap_err("Failed to register window class");
        }
        debug!("Registered window class {}", config.class_name);

        let (width, height) = config.client_size;
        let mut window_rect = RECT {
            left: 0,
            top: 0,
            right: width as i32,
            bottom: height as i32,
        };
        // Grow the rectangle so the client area, not the frame, has the requested size.
        unsafe { AdjustWindowRect(&mut window_rect, WS_OVERLAPPEDWINDOW, false)? };

        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                PCWSTR(class_name.as_ptr()),
                PCWSTR(title.as_ptr()),
                WS_OVERLAPPEDWINDOW,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                window_rect.right - window_rect.left,
                window_rect.bottom - window_rect.top,
                None, // no parent window
                None, // no menus
                Some(instance.into()),
                None,
            )
        }
        .wrap_err("Failed to create application window")?;

        unsafe {
            _ = ShowWindow(hwnd, SW_SHOWDEFAULT);
            _ = UpdateWindow(hwnd);
        }
        info!("Created window \"{}\" ({}x{})", config.title, width, height);

        Ok(Self {
            hwnd,
            _class_name: class_name,
        })
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn client_size(&self) -> MyResult<(u32, u32)> {
        let mut client_rect = RECT::default();
        unsafe { GetClientRect(self.hwnd, &mut client_rect)? };
        Ok((
            (client_rect.right - client_rect.left) as u32,
            (client_rect.bottom - client_rect.top) as u32,
        ))
    }
}

impl Drop for WindowHost {
    fn drop(&mut self) {
        // Already gone when the user closed it; this only matters when
        // startup failed with the window still open.
        if unsafe { DestroyWindow(self.hwnd) }.is_ok() {
            debug!("Destroyed window");
        }
    }
}

fn get_handle_to_file_used_to_create_the_calling_process() -> MyResult<HMODULE> {
    let mut out = Default::default();
    unsafe { GetModuleHandleExW(Default::default(), None, &mut out)? };
    Ok(out)
}

/// Blocking error dialog, used for every fatal startup failure.
pub fn show_alert(text: &str, caption: &str) {
    let text = U16CString::from_str_truncate(text);
    let caption = U16CString::from_str_truncate(caption);
    unsafe {
        MessageBoxW(
            None,
            PCWSTR(text.as_ptr()),
            PCWSTR(caption.as_ptr()),
            MB_OK | MB_ICONERROR,
        );
    }
}
