//! Desktop shell: one window, the content surface and the bottom toolbar.
//!
//! Everything stateful lives inside the event-loop closure. Webview
//! callbacks only decode their input and post a [`UserEvent`].
//!
//! The content webview is built once a blank reporter view has reported the
//! engine's own user agent, so the suffix lands on the real default.

use std::time::{Duration, Instant};

use anyhow::Context;
use echoes_browser::ipc::parse_message;
use echoes_browser::{BrowserHost, FileCallback, PAGE_BRIDGE_JS, PageMessage, route};
use echoes_platform::DefaultBackHandler;
use echoes_types::config::HostConfig;
use echoes_types::event::{NavigationRequest, PickerResult};
use echoes_ui::ToolbarTrack;
use tao::event::{Event, StartCause, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use tao::window::{Window, WindowBuilder};
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::{PageLoadEvent, Rect, WebView, WebViewBuilder};

use crate::files::{FILE_SCHEME, PickedFiles};
use crate::os::{DesktopDispatcher, USER_AGENT_REPORT_HTML, engine_user_agent};
use crate::picker::DesktopPicker;
use crate::surface::{ContentSurface, picked_file_response};
use crate::toolbar_page::TOOLBAR_HTML;

const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug)]
pub enum UserEvent {
    /// Decoded IPC message from either webview.
    Page(PageMessage),
    /// A top-level load started in the content surface.
    PageLoad(String),
    /// `navigator.userAgent` as reported by the reporter view.
    EngineUserAgent(String),
    /// Answer of picker launch number `launch`.
    PickerResult { launch: u64, result: PickerResult },
    ResolveFiles { id: u64, uris: Vec<String> },
}

/// Minimizes the window when the page has nothing to go back to.
struct SendToBackground<'a>(&'a Window);

impl DefaultBackHandler for SendToBackground<'_> {
    fn default_back(&mut self) {
        log::info!("no history left, minimizing");
        self.0.set_minimized(true);
    }
}

fn post(proxy: &EventLoopProxy<UserEvent>, event: UserEvent) {
    if proxy.send_event(event).is_err() {
        log::warn!("event loop closed, dropping event");
    }
}

fn ipc_to_proxy(proxy: EventLoopProxy<UserEvent>) -> impl Fn(wry::http::Request<String>) + 'static {
    move |req| match parse_message(req.body()) {
        Ok(msg) => post(&proxy, UserEvent::Page(msg)),
        Err(e) => log::warn!("dropping page message: {e}"),
    }
}

/// Content above, toolbar below. The toolbar slides down by `offset`.
fn layout(
    window: &Window,
    content: Option<&ContentSurface>,
    toolbar: &WebView,
    height: f32,
    offset: f32,
) {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    let visible = f64::from((height - offset).clamp(0.0, height));
    let content_height = (size.height - visible).max(0.0);

    if let Some(content) = content {
        content.set_bounds(Rect {
            position: LogicalPosition::new(0.0, 0.0).into(),
            size: LogicalSize::new(size.width, content_height).into(),
        });
    }
    let toolbar_bounds = Rect {
        position: LogicalPosition::new(0.0, content_height).into(),
        size: LogicalSize::new(size.width, f64::from(height)).into(),
    };
    if let Err(e) = toolbar.set_bounds(toolbar_bounds) {
        log::warn!("toolbar relayout failed: {e}");
    }
}

fn user_agent_reporter(window: &Window, proxy: &EventLoopProxy<UserEvent>) -> wry::Result<WebView> {
    let proxy = proxy.clone();
    WebViewBuilder::new()
        .with_html(USER_AGENT_REPORT_HTML)
        .with_bounds(Rect {
            position: LogicalPosition::new(0.0, 0.0).into(),
            size: LogicalSize::new(0.0, 0.0).into(),
        })
        .with_ipc_handler(move |req: wry::http::Request<String>| {
            post(&proxy, UserEvent::EngineUserAgent(req.into_body()));
        })
        .build_as_child(window)
}

fn content_webview(
    window: &Window,
    config: &HostConfig,
    engine_ua: &str,
    proxy: &EventLoopProxy<UserEvent>,
    files: &PickedFiles,
) -> wry::Result<WebView> {
    let settings = &config.surface;
    let dispatcher = DesktopDispatcher;
    let load_proxy = proxy.clone();
    let served = files.clone();
    let user_agent = settings.user_agent(engine_ua);

    let mut builder = WebViewBuilder::new()
        .with_user_agent(&user_agent)
        .with_initialization_script(PAGE_BRIDGE_JS)
        .with_incognito(!settings.dom_storage)
        .with_hotkeys_zoom(settings.zoom_controls)
        .with_devtools(cfg!(debug_assertions))
        .with_navigation_handler(move |url: String| {
            !route(&NavigationRequest::main_frame(url), &dispatcher)
        })
        .with_on_page_load_handler(move |event, url| {
            if let PageLoadEvent::Started = event {
                post(&load_proxy, UserEvent::PageLoad(url));
            }
        })
        .with_ipc_handler(ipc_to_proxy(proxy.clone()))
        .with_asynchronous_custom_protocol(FILE_SCHEME.into(), move |_id, request, responder| {
            let files = served.clone();
            let path = request.uri().path().to_string();
            std::thread::spawn(move || responder.respond(picked_file_response(&files, &path)));
        });

    if !settings.javascript {
        builder = builder.with_javascript_disabled();
    }
    if !settings.wide_viewport {
        log::debug!("wide viewport cannot be disabled on this engine");
    }
    #[cfg(target_os = "windows")]
    {
        use wry::WebViewBuilderExtWindows;
        builder = builder.with_https_scheme(true);
    }

    builder.build_as_child(window)
}

fn toolbar_webview(window: &Window, proxy: &EventLoopProxy<UserEvent>) -> wry::Result<WebView> {
    WebViewBuilder::new()
        .with_html(TOOLBAR_HTML)
        .with_ipc_handler(ipc_to_proxy(proxy.clone()))
        .build_as_child(window)
}

/// Open the window and run the event loop. Only returns on setup failure.
pub fn run(config: HostConfig) -> anyhow::Result<()> {
    let mut host = BrowserHost::new(config).context("invalid host configuration")?;
    let config = host.config().clone();

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title(&config.window_title)
        .with_inner_size(LogicalSize::new(config.window_width, config.window_height))
        .build(&event_loop)
        .context("failed to create window")?;

    let files = PickedFiles::new();
    let toolbar = toolbar_webview(&window, &proxy).context("failed to create toolbar view")?;
    let mut reporter =
        Some(user_agent_reporter(&window, &proxy).context("failed to create user agent reporter")?);
    let mut content: Option<ContentSurface> = None;
    let mut picker = DesktopPicker::new(proxy.clone(), files.clone());

    let height = config.toolbar.height;
    let mut track = ToolbarTrack::new();
    host.on_toolbar_resized(height, &mut track);
    layout(&window, None, &toolbar, height, track.offset());

    let mut last_frame = Instant::now();
    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => log::info!("window ready"),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                host.shutdown();
                *control_flow = ControlFlow::Exit;
                return;
            },
            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => layout(&window, content.as_ref(), &toolbar, height, track.offset()),
            Event::UserEvent(UserEvent::EngineUserAgent(reported)) if content.is_none() => {
                drop(reporter.take());
                let Some(engine_ua) = engine_user_agent(&reported) else {
                    log::error!("engine reported an unusable user agent: {reported:?}");
                    *control_flow = ControlFlow::Exit;
                    return;
                };
                log::info!("engine user agent: {engine_ua}");
                let mut surface =
                    match content_webview(&window, &config, engine_ua, &proxy, &files) {
                        Ok(webview) => ContentSurface::new(webview),
                        Err(e) => {
                            log::error!("failed to create content view: {e}");
                            *control_flow = ControlFlow::Exit;
                            return;
                        },
                    };
                layout(&window, Some(&surface), &toolbar, height, track.offset());
                if let Err(e) = host.start(&mut surface) {
                    log::error!("failed to load origin: {e}");
                }
                content = Some(surface);
            },
            Event::UserEvent(UserEvent::Page(msg)) => match (msg, content.as_mut()) {
                (PageMessage::Scroll { y }, _) => {
                    let was_animating = track.is_animating();
                    host.on_scroll_offset(y, &mut track);
                    if !was_animating && track.is_animating() {
                        last_frame = Instant::now();
                    }
                },
                (PageMessage::FileRequest { id, multiple }, _) => {
                    picker.set_page_multiple(multiple);
                    let reply = proxy.clone();
                    let callback: FileCallback = Box::new(move |uris| {
                        post(&reply, UserEvent::ResolveFiles { id, uris });
                    });
                    host.on_file_request(callback, &mut picker);
                },
                (PageMessage::History { index }, Some(surface)) => surface.set_page_index(index),
                (PageMessage::Back, Some(surface)) => {
                    let outcome = host.on_back_requested(surface, &mut SendToBackground(&window));
                    log::debug!("back handled: {outcome:?}");
                },
                (PageMessage::Refresh, Some(surface)) => host.refresh(surface),
                (msg, None) => log::debug!("no content view yet, dropping {msg:?}"),
            },
            Event::UserEvent(UserEvent::PageLoad(url)) => {
                if let Some(surface) = content.as_mut() {
                    surface.record(&url);
                }
                host.on_page_navigated();
            },
            Event::UserEvent(UserEvent::PickerResult { launch, result }) => {
                if picker.is_current(launch) {
                    host.on_picker_result(result);
                } else {
                    log::info!("dropping answer of superseded picker #{launch}");
                }
            },
            Event::UserEvent(UserEvent::ResolveFiles { id, uris }) => {
                if let Some(surface) = content.as_ref() {
                    surface.resolve_files(id, &uris);
                }
            },
            _ => {},
        }

        if track.is_animating() {
            let now = Instant::now();
            let dt = now.duration_since(last_frame);
            if dt >= FRAME {
                last_frame = now;
                let dt_ms = u32::try_from(dt.as_millis()).unwrap_or(u32::MAX);
                if let Some(offset) = track.tick(dt_ms) {
                    layout(&window, content.as_ref(), &toolbar, height, offset);
                }
            }
            *control_flow = ControlFlow::WaitUntil(last_frame + FRAME);
        }
    })
}
