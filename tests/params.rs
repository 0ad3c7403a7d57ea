// ABOUTME: Integration tests for operation parameter objects.
// ABOUTME: Validates required fields, derived image names and value semantics.

use dockwire::auth::{AuthConfigs, Credential};
use dockwire::params::*;
use proptest::prelude::*;
use std::collections::HashSet;

mod pull {
    use super::*;

    #[test]
    fn fqn_with_registry_and_namespace() {
        let params = PullParams::create("myrepo")
            .unwrap()
            .with_registry("reg.local:5000")
            .with_namespace("alice")
            .with_tag("1.0");

        assert_eq!(params.image_fqn(), "reg.local:5000/alice/myrepo");
        assert_eq!(params.tag(), Some("1.0"));
    }

    #[test]
    fn namespace_already_in_image_is_kept() {
        let params = PullParams::create("library/nginx")
            .unwrap()
            .with_registry("mirror.local");
        assert_eq!(params.image_fqn(), "mirror.local/library/nginx");
    }

    #[test]
    fn blank_image_is_rejected() {
        let err = PullParams::create("").unwrap_err();
        assert_eq!(err, ValidationError::MissingField("image"));
        assert_eq!(err.to_string(), "image is required");
    }

    proptest! {
        #[test]
        fn fqn_joins_present_parts_with_slashes(
            image in "[a-z][a-z0-9]{0,8}",
            registry in proptest::option::of("[a-z]{1,6}(:[0-9]{2,4})?"),
            namespace in proptest::option::of("[a-z]{1,6}"),
        ) {
            let mut params = PullParams::create(image.clone()).unwrap();
            if let Some(registry) = &registry {
                params = params.with_registry(registry.clone());
            }
            if let Some(namespace) = &namespace {
                params = params.with_namespace(namespace.clone());
            }

            let expected: Vec<&str> = [registry.as_deref(), namespace.as_deref(), Some(image.as_str())]
                .into_iter()
                .flatten()
                .collect();
            prop_assert_eq!(params.image_fqn(), expected.join("/"));
        }
    }
}

mod push {
    use super::*;

    #[test]
    fn fqn_prefixes_registry() {
        let params = PushParams::create("team/app")
            .unwrap()
            .with_registry("reg.local:5000")
            .with_tag("v2");
        assert_eq!(params.repository_fqn(), "reg.local:5000/team/app");
        assert_eq!(params.tag(), Some("v2"));
    }

    #[test]
    fn fqn_without_registry_is_repository() {
        let params = PushParams::create("team/app").unwrap();
        assert_eq!(params.repository_fqn(), "team/app");
        assert_eq!(params.registry(), None);
    }

    #[test]
    fn blank_repository_is_rejected() {
        assert_eq!(
            PushParams::create(" ").unwrap_err(),
            ValidationError::MissingField("repository")
        );
    }
}

mod build {
    use super::*;

    #[test]
    fn defaults_remove_intermediate_containers() {
        let params = BuildImageParams::from_directory("/tmp/ctx").unwrap();
        assert!(params.remove_intermediate());
        assert!(!params.no_cache());
        assert!(!params.force_remove());
        assert_eq!(params.image_tag(), None);
    }

    #[test]
    fn image_tag_combines_repository_and_tag() {
        let params = BuildImageParams::from_remote("https://example.com/ctx.git")
            .unwrap()
            .with_repository("user/app")
            .with_tag("dev");
        assert_eq!(params.image_tag().as_deref(), Some("user/app:dev"));
        assert!(matches!(params.context(), BuildContext::Remote(url) if url.ends_with("ctx.git")));
    }

    #[test]
    fn build_args_are_kept_sorted() {
        let params = BuildImageParams::from_directory(".")
            .unwrap()
            .with_build_arg("VERSION", "1.2")
            .with_build_arg("BASE", "alpine");
        let names: Vec<&str> = params.build_args().keys().map(String::as_str).collect();
        assert_eq!(names, ["BASE", "VERSION"]);
    }

    #[test]
    fn blank_remote_is_rejected() {
        assert!(BuildImageParams::from_remote("").is_err());
    }
}

mod network {
    use super::*;

    #[test]
    fn requires_network_id() {
        assert_eq!(
            InspectNetworkParams::create("").unwrap_err(),
            ValidationError::MissingField("network id")
        );
        assert_eq!(
            InspectNetworkParams::create("bridge").unwrap().network_id(),
            "bridge"
        );
    }
}

mod value_semantics {
    use super::*;

    fn sample() -> PullParams {
        PullParams::create("app")
            .unwrap()
            .with_registry("reg.local")
            .with_tag("1")
            .with_auth_configs(AuthConfigs::new().with(Credential::new("reg.local", "u", "p")))
    }

    #[test]
    fn equal_fields_are_equal_and_hash_alike() {
        let mut set = HashSet::new();
        set.insert(sample());
        set.insert(sample());
        assert_eq!(set.len(), 1);
        assert_eq!(sample(), sample());
    }

    #[test]
    fn any_field_difference_breaks_equality() {
        assert_ne!(sample(), sample().with_tag("2"));
        assert_ne!(sample(), sample().with_namespace("ns"));
    }

    #[test]
    fn with_returns_new_value_leaving_original() {
        let original = sample();
        let changed = original.clone().with_tag("latest");
        assert_eq!(original.tag(), Some("1"));
        assert_eq!(changed.tag(), Some("latest"));
    }
}
