// ============================================================================
// CART VIEWMODEL - LÓGICA DEL BOTÓN DE CANTIDAD
// ============================================================================
// click -> guardia de sesión -> POST -> UpdateOutcome -> apply_outcome
// El servicio solo habla HTTP y la vista solo escribe nodos.
// ============================================================================

use crate::config::CartConfig;
use crate::models::{CartError, TriggerData, UpdateItemRequest, UpdateOutcome, UpdateResult};
use crate::services::CartTransport;
use crate::state::RequestTracker;
use crate::utils::format::js_number_string;
use crate::utils::i18n::{KEY_LOGIN_REQUIRED, KEY_UPDATE_FAILED};
use crate::views::CartPage;

/// ViewModel del carrito: una instancia por página
pub struct CartViewModel<T: CartTransport, P: CartPage> {
    config: CartConfig,
    transport: T,
    page: P,
    tracker: RequestTracker,
}

impl<T: CartTransport, P: CartPage> CartViewModel<T, P> {
    pub fn new(config: CartConfig, transport: T, page: P) -> Self {
        Self {
            config,
            transport,
            page,
            tracker: RequestTracker::new(),
        }
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Click completo: petición y resultado aplicado a la página
    pub async fn handle_trigger(&self, trigger: &TriggerData) -> UpdateOutcome {
        let outcome = self.update_item(trigger).await;
        self.apply_outcome(&outcome);
        outcome
    }

    /// Enviar el cambio de cantidad sin tocar la página
    pub async fn update_item(&self, trigger: &TriggerData) -> UpdateOutcome {
        if !self.config.is_authenticated {
            log::info!("🔒 Visitante sin sesión, no se llama al servidor");
            return UpdateOutcome::Failure(CartError::Unauthenticated);
        }

        let request = UpdateItemRequest::from(trigger);
        // Sin producto no hay nodos que proteger: no entra en el tracker
        let ticket = trigger.product_id.as_deref().map(|id| self.tracker.begin(id));

        log::info!(
            "🛒 Actualizando carrito: producto {:?} | acción {:?}",
            trigger.product_id,
            trigger.action
        );

        let result = match self.transport.post_update(&request).await {
            Ok(body) => UpdateResult::parse(trigger.product_id.clone(), &body),
            Err(e) => Err(e),
        };

        if let Some(ticket) = &ticket {
            let is_current = self.tracker.finish(ticket);
            if self.config.discard_stale_responses && !is_current {
                log::warn!("⏭️ Respuesta obsoleta para producto '{}', descartada", ticket.key());
                return UpdateOutcome::Superseded;
            }
        }

        result.into()
    }

    /// Único punto donde un resultado llega a la página
    pub fn apply_outcome(&self, outcome: &UpdateOutcome) {
        match outcome {
            UpdateOutcome::Success(update) => {
                log::info!("📦 Resultado del servidor: {:?}", update);
                self.render_update(update);
            }
            UpdateOutcome::Failure(CartError::Unauthenticated) => {
                self.page.notify(&self.config.message(KEY_LOGIN_REQUIRED));
                if let Err(e) = self.page.redirect(&self.config.login_path) {
                    log::error!("❌ No se pudo redirigir a {}: {}", self.config.login_path, e);
                }
            }
            UpdateOutcome::Failure(e) => {
                log::error!("❌ Error al actualizar el carrito: {}", e);
                self.page.notify(&self.config.message(KEY_UPDATE_FAILED));
            }
            UpdateOutcome::Superseded => {}
        }
    }

    fn render_update(&self, update: &UpdateResult) {
        let currency = self.config.currency_format();

        if let Some(product_id) = update.product_id.as_deref() {
            if let Some(quantity) = update.quantity {
                if !self.page.set_item_quantity(product_id, &js_number_string(quantity)) {
                    log::debug!("Sin nodo de cantidad para producto '{}'", product_id);
                }
            }
            if let Some(item_total) = &update.item_total {
                self.page.set_item_total(product_id, &currency.format_amount(item_total));
            }
        }

        if let Some(cart_total) = &update.cart_total {
            self.page.set_cart_total(&currency.format_amount(cart_total));
        }

        if let Some(total_quantity) = update.total_quantity {
            self.page.set_cart_count(&js_number_string(total_quantity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::Amount;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    const VI_LOGIN: &str = "⚠️ Bạn cần đăng nhập để thêm vào giỏ hàng!";
    const VI_FAILED: &str = "Có lỗi xảy ra khi thêm sản phẩm vào giỏ!";

    /// Transporte con respuestas preparadas; guarda los bodies enviados
    #[derive(Default)]
    struct ScriptedTransport {
        replies: RefCell<VecDeque<Result<String, CartError>>>,
        sent: RefCell<Vec<String>>,
    }

    impl ScriptedTransport {
        fn replying(replies: Vec<Result<&str, CartError>>) -> Self {
            Self {
                replies: RefCell::new(
                    replies.into_iter().map(|r| r.map(str::to_string)).collect(),
                ),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl CartTransport for ScriptedTransport {
        async fn post_update(&self, request: &UpdateItemRequest) -> Result<String, CartError> {
            self.sent.borrow_mut().push(request.to_json()?);
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(CartError::Network("no scripted reply".into())))
        }
    }

    /// Transporte que espera a que el test libere cada respuesta
    struct GatedTransport {
        gates: RefCell<VecDeque<oneshot::Receiver<String>>>,
    }

    impl CartTransport for GatedTransport {
        async fn post_update(&self, _request: &UpdateItemRequest) -> Result<String, CartError> {
            let gate = self.gates.borrow_mut().pop_front();
            match gate {
                Some(rx) => rx.await.map_err(|e| CartError::Network(e.to_string())),
                None => Err(CartError::Network("no gate".into())),
            }
        }
    }

    /// Página en memoria: solo existen los nodos creados con `with_node`
    #[derive(Default)]
    struct RecordingPage {
        nodes: RefCell<HashMap<String, String>>,
        notices: RefCell<Vec<String>>,
        redirects: RefCell<Vec<String>>,
    }

    impl RecordingPage {
        fn with_node(self, id: &str, text: &str) -> Self {
            self.nodes.borrow_mut().insert(id.to_string(), text.to_string());
            self
        }

        fn text(&self, id: &str) -> Option<String> {
            self.nodes.borrow().get(id).cloned()
        }

        fn write(&self, id: &str, text: &str) -> bool {
            match self.nodes.borrow_mut().get_mut(id) {
                Some(node) => {
                    *node = text.to_string();
                    true
                }
                None => false,
            }
        }
    }

    impl CartPage for RecordingPage {
        fn set_item_quantity(&self, product_id: &str, text: &str) -> bool {
            self.write(&format!("qty-{}", product_id), text)
        }

        fn set_item_total(&self, product_id: &str, text: &str) -> bool {
            self.write(&format!("item-total-{}", product_id), text)
        }

        fn set_cart_total(&self, text: &str) -> bool {
            self.write("cart-total", text)
        }

        fn set_cart_count(&self, text: &str) -> bool {
            self.write("cart-count", text)
        }

        fn notify(&self, message: &str) {
            self.notices.borrow_mut().push(message.to_string());
        }

        fn redirect(&self, path: &str) -> Result<(), String> {
            self.redirects.borrow_mut().push(path.to_string());
            Ok(())
        }
    }

    fn config(is_authenticated: bool) -> CartConfig {
        CartConfig {
            is_authenticated,
            csrf_token: Some("tok".into()),
            ..CartConfig::from_app_config(&AppConfig::default())
        }
    }

    fn cart_page() -> RecordingPage {
        RecordingPage::default()
            .with_node("qty-7", "2")
            .with_node("cart-total", "100.000 VNĐ")
    }

    fn trigger() -> TriggerData {
        TriggerData::new("7", "increase")
    }

    #[test]
    fn anonymous_visitor_is_redirected_without_request() {
        let vm = CartViewModel::new(config(false), ScriptedTransport::default(), cart_page());

        let outcome = block_on(vm.handle_trigger(&trigger()));

        assert_eq!(outcome, UpdateOutcome::Failure(CartError::Unauthenticated));
        assert!(vm.transport.sent.borrow().is_empty());
        assert_eq!(*vm.page.redirects.borrow(), vec!["/login/".to_string()]);
        assert_eq!(*vm.page.notices.borrow(), vec![VI_LOGIN.to_string()]);
        assert_eq!(vm.page.text("qty-7").as_deref(), Some("2"));
    }

    #[test]
    fn request_body_is_exact() {
        let transport = ScriptedTransport::replying(vec![Ok(r#"{"quantity":3}"#)]);
        let vm = CartViewModel::new(config(true), transport, cart_page());

        block_on(vm.handle_trigger(&trigger()));

        assert_eq!(
            *vm.transport.sent.borrow(),
            vec![r#"{"productId":"7","action":"increase"}"#.to_string()]
        );
    }

    #[test]
    fn quantity_without_total_leaves_total_alone() {
        let transport = ScriptedTransport::replying(vec![Ok(r#"{"quantity":3}"#)]);
        let vm = CartViewModel::new(config(true), transport, cart_page());

        let outcome = block_on(vm.handle_trigger(&trigger()));

        assert!(matches!(outcome, UpdateOutcome::Success(_)));
        assert_eq!(vm.page.text("qty-7").as_deref(), Some("3"));
        assert_eq!(vm.page.text("cart-total").as_deref(), Some("100.000 VNĐ"));
        assert!(vm.page.notices.borrow().is_empty());
    }

    #[test]
    fn cart_total_is_locale_formatted() {
        let transport = ScriptedTransport::replying(vec![Ok(r#"{"quantity":5,"cart_total":125000}"#)]);
        let vm = CartViewModel::new(config(true), transport, cart_page());

        block_on(vm.handle_trigger(&trigger()));

        assert_eq!(vm.page.text("qty-7").as_deref(), Some("5"));
        assert_eq!(vm.page.text("cart-total").as_deref(), Some("125.000 VNĐ"));
    }

    #[test]
    fn english_locale_groups_with_commas() {
        let mut cfg = config(true);
        cfg.locale = "en-US".into();
        let transport = ScriptedTransport::replying(vec![Ok(r#"{"quantity":5,"cart_total":125000}"#)]);
        let vm = CartViewModel::new(cfg, transport, cart_page());

        block_on(vm.handle_trigger(&trigger()));

        assert_eq!(vm.page.text("cart-total").as_deref(), Some("125,000 VNĐ"));
    }

    #[test]
    fn server_error_shows_one_notice_and_touches_nothing() {
        let transport = ScriptedTransport::replying(vec![Err(CartError::Http { status: 500 })]);
        let vm = CartViewModel::new(config(true), transport, cart_page());

        let outcome = block_on(vm.handle_trigger(&trigger()));

        assert_eq!(outcome, UpdateOutcome::Failure(CartError::Http { status: 500 }));
        assert_eq!(*vm.page.notices.borrow(), vec![VI_FAILED.to_string()]);
        assert_eq!(vm.page.text("qty-7").as_deref(), Some("2"));
        assert_eq!(vm.page.text("cart-total").as_deref(), Some("100.000 VNĐ"));
        assert!(vm.page.redirects.borrow().is_empty());
    }

    #[test]
    fn network_and_parse_failures_share_the_generic_notice() {
        let transport = ScriptedTransport::replying(vec![
            Err(CartError::Network("offline".into())),
            Ok("<html>500</html>"),
        ]);
        let vm = CartViewModel::new(config(true), transport, cart_page());

        let first = block_on(vm.handle_trigger(&trigger()));
        let second = block_on(vm.handle_trigger(&trigger()));

        assert!(matches!(first, UpdateOutcome::Failure(CartError::Network(_))));
        assert!(matches!(second, UpdateOutcome::Failure(CartError::Parse(_))));
        assert_eq!(
            *vm.page.notices.borrow(),
            vec![VI_FAILED.to_string(), VI_FAILED.to_string()]
        );
        assert_eq!(vm.page.text("qty-7").as_deref(), Some("2"));
    }

    #[test]
    fn unauthorized_response_shows_generic_notice() {
        let transport = ScriptedTransport::replying(vec![Err(CartError::Http { status: 401 })]);
        let vm = CartViewModel::new(config(true), transport, cart_page());

        let outcome = block_on(vm.handle_trigger(&trigger()));

        assert_eq!(outcome, UpdateOutcome::Failure(CartError::Http { status: 401 }));
        assert_eq!(*vm.page.notices.borrow(), vec![VI_FAILED.to_string()]);
        assert!(vm.page.redirects.borrow().is_empty());
        assert_eq!(vm.page.text("qty-7").as_deref(), Some("2"));
    }

    #[test]
    fn identical_calls_are_idempotent() {
        let body = r#"{"quantity":4,"cart_total":80000}"#;
        let transport = ScriptedTransport::replying(vec![Ok(body), Ok(body)]);
        let vm = CartViewModel::new(config(true), transport, cart_page());

        block_on(vm.handle_trigger(&trigger()));
        let after_first = (vm.page.text("qty-7"), vm.page.text("cart-total"));
        block_on(vm.handle_trigger(&trigger()));
        let after_second = (vm.page.text("qty-7"), vm.page.text("cart-total"));

        assert_eq!(after_first, after_second);
        assert_eq!(after_second.0.as_deref(), Some("4"));
        assert_eq!(after_second.1.as_deref(), Some("80.000 VNĐ"));
    }

    #[test]
    fn missing_nodes_are_tolerated() {
        let transport = ScriptedTransport::replying(vec![Ok(r#"{"quantity":5,"cart_total":125000}"#)]);
        let vm = CartViewModel::new(config(true), transport, RecordingPage::default());

        let outcome = block_on(vm.handle_trigger(&trigger()));

        assert!(matches!(outcome, UpdateOutcome::Success(_)));
        assert!(vm.page.notices.borrow().is_empty());
    }

    #[test]
    fn server_extras_fill_optional_nodes() {
        let body = r#"{"status":"ok","quantity":2,"item_total":60000,"total_quantity":5,"total_price":150000}"#;
        let transport = ScriptedTransport::replying(vec![Ok(body)]);
        let page = cart_page()
            .with_node("item-total-7", "")
            .with_node("cart-count", "4");
        let vm = CartViewModel::new(config(true), transport, page);

        block_on(vm.handle_trigger(&trigger()));

        assert_eq!(vm.page.text("qty-7").as_deref(), Some("2"));
        assert_eq!(vm.page.text("item-total-7").as_deref(), Some("60.000 VNĐ"));
        assert_eq!(vm.page.text("cart-count").as_deref(), Some("5"));
        assert_eq!(vm.page.text("cart-total").as_deref(), Some("150.000 VNĐ"));
    }

    #[test]
    fn deleted_line_shows_zero() {
        let body = r#"{"status":"deleted","product_id":7,"total_quantity":0,"total_price":0}"#;
        let transport = ScriptedTransport::replying(vec![Ok(body)]);
        let vm = CartViewModel::new(config(true), transport, cart_page());

        block_on(vm.handle_trigger(&TriggerData::new("7", "delete")));

        assert_eq!(vm.page.text("qty-7").as_deref(), Some("0"));
        assert_eq!(vm.page.text("cart-total").as_deref(), Some("0 VNĐ"));
    }

    #[test]
    fn trigger_without_product_skips_item_nodes() {
        let transport = ScriptedTransport::replying(vec![Ok(r#"{"quantity":1,"cart_total":5000}"#)]);
        let vm = CartViewModel::new(config(true), transport, cart_page());
        let trigger = TriggerData {
            product_id: None,
            action: Some("add".into()),
        };

        block_on(vm.handle_trigger(&trigger));

        assert_eq!(*vm.transport.sent.borrow(), vec![r#"{"action":"add"}"#.to_string()]);
        assert_eq!(vm.page.text("qty-7").as_deref(), Some("2"));
        assert_eq!(vm.page.text("cart-total").as_deref(), Some("5.000 VNĐ"));
    }

    #[test]
    fn stale_response_for_same_product_is_discarded() {
        let (tx1, rx1) = oneshot::channel();
        let (tx2, rx2) = oneshot::channel();
        let transport = GatedTransport {
            gates: RefCell::new(VecDeque::from(vec![rx1, rx2])),
        };
        let vm = CartViewModel::new(config(true), transport, cart_page());
        let click = trigger();

        let (first, second, _) = block_on(async {
            futures::join!(vm.handle_trigger(&click), vm.handle_trigger(&click), async move {
                // La respuesta nueva llega antes que la vieja
                tx2.send(r#"{"quantity":4,"cart_total":40000}"#.to_string()).unwrap();
                tx1.send(r#"{"quantity":3,"cart_total":30000}"#.to_string()).unwrap();
            })
        });

        assert_eq!(first, UpdateOutcome::Superseded);
        assert!(matches!(second, UpdateOutcome::Success(_)));
        assert_eq!(vm.page.text("qty-7").as_deref(), Some("4"));
        assert_eq!(vm.page.text("cart-total").as_deref(), Some("40.000 VNĐ"));
        assert_eq!(vm.tracker.in_flight(), 0);
    }

    #[test]
    fn stale_guard_can_be_disabled() {
        let (tx1, rx1) = oneshot::channel();
        let (tx2, rx2) = oneshot::channel();
        let transport = GatedTransport {
            gates: RefCell::new(VecDeque::from(vec![rx1, rx2])),
        };
        let mut cfg = config(true);
        cfg.discard_stale_responses = false;
        let vm = CartViewModel::new(cfg, transport, cart_page());
        let click = trigger();

        let (first, second, _) = block_on(async {
            futures::join!(vm.handle_trigger(&click), vm.handle_trigger(&click), async move {
                tx1.send(r#"{"quantity":3}"#.to_string()).unwrap();
                tx2.send(r#"{"quantity":4}"#.to_string()).unwrap();
            })
        });

        assert!(matches!(first, UpdateOutcome::Success(_)));
        assert!(matches!(second, UpdateOutcome::Success(_)));
    }

    #[test]
    fn different_products_do_not_supersede_each_other() {
        let (tx1, rx1) = oneshot::channel();
        let (tx2, rx2) = oneshot::channel();
        let transport = GatedTransport {
            gates: RefCell::new(VecDeque::from(vec![rx1, rx2])),
        };
        let page = cart_page().with_node("qty-8", "1");
        let vm = CartViewModel::new(config(true), transport, page);
        let seven = TriggerData::new("7", "add");
        let eight = TriggerData::new("8", "add");

        let (a, b, _) = block_on(async {
            futures::join!(vm.handle_trigger(&seven), vm.handle_trigger(&eight), async move {
                tx2.send(r#"{"quantity":2}"#.to_string()).unwrap();
                tx1.send(r#"{"quantity":3}"#.to_string()).unwrap();
            })
        });

        assert!(matches!(a, UpdateOutcome::Success(_)));
        assert!(matches!(b, UpdateOutcome::Success(_)));
        assert_eq!(vm.page.text("qty-7").as_deref(), Some("3"));
        assert_eq!(vm.page.text("qty-8").as_deref(), Some("2"));
    }

    #[test]
    fn concurrent_clicks_without_product_are_all_applied() {
        let (tx1, rx1) = oneshot::channel();
        let (tx2, rx2) = oneshot::channel();
        let transport = GatedTransport {
            gates: RefCell::new(VecDeque::from(vec![rx1, rx2])),
        };
        let vm = CartViewModel::new(config(true), transport, cart_page());
        let click = TriggerData {
            product_id: None,
            action: Some("add".into()),
        };

        let (first, second, _) = block_on(async {
            futures::join!(vm.handle_trigger(&click), vm.handle_trigger(&click), async move {
                tx2.send(r#"{"cart_total":20000}"#.to_string()).unwrap();
                tx1.send(r#"{"cart_total":10000}"#.to_string()).unwrap();
            })
        });

        assert!(matches!(first, UpdateOutcome::Success(_)));
        assert!(matches!(second, UpdateOutcome::Success(_)));
        assert_eq!(vm.page.text("cart-total").as_deref(), Some("10.000 VNĐ"));
        assert_eq!(vm.tracker.in_flight(), 0);
    }

    #[test]
    fn float_quantities_render_as_integers() {
        let body = r#"{"quantity":3.0,"total_quantity":6.0}"#;
        let transport = ScriptedTransport::replying(vec![Ok(body)]);
        let vm = CartViewModel::new(config(true), transport, cart_page().with_node("cart-count", "5"));

        block_on(vm.handle_trigger(&trigger()));

        assert_eq!(vm.page.text("qty-7").as_deref(), Some("3"));
        assert_eq!(vm.page.text("cart-count").as_deref(), Some("6"));
    }

    #[test]
    fn text_total_is_shown_verbatim() {
        let transport = ScriptedTransport::replying(vec![Ok(r#"{"quantity":1,"cart_total":"99000.00"}"#)]);
        let vm = CartViewModel::new(config(true), transport, cart_page());

        let outcome = block_on(vm.handle_trigger(&trigger()));

        match outcome {
            UpdateOutcome::Success(update) => {
                assert_eq!(update.cart_total, Some(Amount::Text("99000.00".into())))
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(vm.page.text("cart-total").as_deref(), Some("99000.00 VNĐ"));
    }
}
