/// Declare one UPnP action: its request type, response type and constructor
///
/// ```rust,ignore
/// upnp_action! {
///     /// Absolute volume, 0 to 100
///     fn set_volume => SetVolume on RenderingControl {
///         channel: String => "Channel",
///         desired_volume: u8 => "DesiredVolume",
///     } validate |request| {
///         ValidationError::check_range("DesiredVolume", request.desired_volume, 0..=100)
///     }
/// }
/// ```
///
/// Arguments are written in the order listed, after `InstanceID` where the
/// service takes one. A `-> Name { field: ty => "Element" }` tail generates a
/// response struct read from the `{Action}Response` element; without it the
/// response is `()`.
#[macro_export]
macro_rules! upnp_action {
    (
        $(#[$meta:meta])*
        fn $func:ident => $action:ident on $service:ident {
            $($arg:ident: $arg_ty:ty => $arg_elem:literal),* $(,)?
        }
        $(validate |$request:ident| $check:block)?
        -> $response:ident {
            $($field:ident: $field_ty:ty => $field_elem:literal),* $(,)?
        }
    ) => {
        #[doc = concat!("Reply to `", stringify!($action), "`")]
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $response {
            $(pub $field: $field_ty,)*
        }

        $crate::upnp_action! {
            @define
            $(#[$meta])*
            fn $func => $action on $service {
                $($arg: $arg_ty => $arg_elem),*
            }
            $(validate |$request| $check)?
            -> $response |xml| {
                Ok($response {
                    $($field: $crate::operation::read_value(xml, $field_elem)?,)*
                })
            }
        }
    };

    (
        $(#[$meta:meta])*
        fn $func:ident => $action:ident on $service:ident {
            $($arg:ident: $arg_ty:ty => $arg_elem:literal),* $(,)?
        }
        $(validate |$request:ident| $check:block)?
    ) => {
        $crate::upnp_action! {
            @define
            $(#[$meta])*
            fn $func => $action on $service {
                $($arg: $arg_ty => $arg_elem),*
            }
            $(validate |$request| $check)?
            -> () |_xml| { Ok(()) }
        }
    };

    (
        @define
        $(#[$meta:meta])*
        fn $func:ident => $action:ident on $service:ident {
            $($arg:ident: $arg_ty:ty => $arg_elem:literal),*
        }
        $(validate |$request:ident| $check:block)?
        -> $response:ty |$xml:ident| $read:block
    ) => {
        $crate::__paste! {
            #[doc = concat!("Arguments of `", stringify!($action), "`")]
            #[derive(Debug, Clone, PartialEq)]
            pub struct [<$action Request>] {
                $(pub $arg: $arg_ty,)*
            }

            impl $crate::Validate for [<$action Request>] {
                $(
                    fn validate(&self) -> ::std::result::Result<(), $crate::ValidationError> {
                        let $request = self;
                        $check
                    }
                )?
            }

            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $action;

            impl $crate::UPnPOperation for $action {
                type Request = [<$action Request>];
                type Response = $response;

                const SERVICE: $crate::Service = $crate::Service::$service;
                const ACTION: &'static str = stringify!($action);

                #[allow(unused_mut, unused_variables)]
                fn write_arguments(request: &Self::Request) -> String {
                    let mut body = Self::SERVICE.instance_argument().to_string();
                    $($crate::operation::write_argument(&mut body, $arg_elem, &request.$arg);)*
                    body
                }

                fn read_response(
                    $xml: &$crate::operation::Element,
                ) -> ::std::result::Result<Self::Response, $crate::ApiError> {
                    $read
                }
            }

            $(#[$meta])*
            pub fn $func($($arg: $arg_ty),*) -> $crate::Operation<$action> {
                $crate::Operation::new([<$action Request>] { $($arg),* })
            }
        }
    };
}
