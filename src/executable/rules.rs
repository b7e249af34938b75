//! Ordered classification rules per packaging kind
//!
//! Each rule pairs a cheap predicate with an extractor. Rules are evaluated in
//! table order and the first predicate that holds decides the outcome.
//! Extractors read plugin configuration through [`ConfigNode`] helpers, so a
//! missing or oddly shaped value only leaves the matching field empty.

use std::path::Path;

use super::types::{ArchiveType, ClassificationResult, ExecutableClassification, JarStructure};
use crate::constants::coordinates::*;
use crate::constants::maven::DEFAULT_PLUGIN_GROUP;
use crate::core::{ConfigNode, Coordinate};
use crate::manifest::{Plugin, PomModel};
use crate::profiles::module_profiles;

const JAR_LAUNCHER: &str = "org.springframework.boot.loader.JarLauncher";
const WAR_LAUNCHER: &str = "org.springframework.boot.loader.WarLauncher";
const SPRING_BOOT_EMBEDDED_SERVERS: &str = "Tomcat/Jetty/Undertow";
const STARTERS_WITHOUT_PLUGIN: &str = "spring-boot-dependencies (no plugin)";
const JAR_WITH_DEPENDENCY_PLUGIN: &str = "maven-jar-plugin + maven-dependency-plugin";

const ONEJAR_WARNING: &str = "onejar-maven-plugin is obsolete and doesn't work with Java 9+. \
                              Consider migrating to spring-boot-maven-plugin or maven-shade-plugin";
const JAR_STARTERS_WARNING: &str = "Spring Boot dependencies detected but no \
                                    spring-boot-maven-plugin configured. Add \
                                    spring-boot-maven-plugin to create an executable JAR, or use \
                                    maven-shade-plugin/maven-assembly-plugin.";
const WAR_STARTERS_WARNING: &str = "Spring Boot dependencies detected but no \
                                    spring-boot-maven-plugin configured. Add \
                                    spring-boot-maven-plugin to create an executable WAR with \
                                    embedded server.";

/// Inputs shared by every rule
pub struct RuleContext<'a> {
    pub model: &'a PomModel,
    pub coordinate: &'a Coordinate,
    pub module_dir: &'a Path,
}

impl<'a> RuleContext<'a> {
    pub fn new(model: &'a PomModel, coordinate: &'a Coordinate, module_dir: &'a Path) -> Self {
        Self {
            model,
            coordinate,
            module_dir,
        }
    }

    fn plugin(&self, group_id: &str, artifact_id: &str) -> Option<&'a Plugin> {
        self.model.find_plugin(group_id, artifact_id)
    }

    fn maven_plugin(&self, artifact_id: &str) -> Option<&'a Plugin> {
        self.plugin(DEFAULT_PLUGIN_GROUP, artifact_id)
    }

    fn run_jar(&self, suffix: &str) -> String {
        format!(
            "java -jar target/{}-{}{}",
            self.coordinate.artifact_id, self.coordinate.version, suffix
        )
    }
}

pub struct ClassificationRule {
    pub name: &'static str,
    pub applies: fn(&RuleContext<'_>) -> bool,
    pub classify: fn(&RuleContext<'_>) -> ClassificationResult,
}

pub static JAR_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "spring-boot-repackage",
        applies: |ctx| {
            ctx.plugin(SPRING_BOOT_GROUP, SPRING_BOOT_PLUGIN)
                .is_some_and(|p| p.has_goal("repackage"))
        },
        classify: spring_boot_jar,
    },
    ClassificationRule {
        name: "shade",
        applies: |ctx| ctx.maven_plugin(SHADE_PLUGIN).is_some_and(|p| p.has_goal("shade")),
        classify: shade_jar,
    },
    ClassificationRule {
        name: "assembly",
        applies: |ctx| {
            ctx.maven_plugin(ASSEMBLY_PLUGIN)
                .is_some_and(|p| p.has_goal("single"))
        },
        classify: assembly_jar,
    },
    ClassificationRule {
        name: "jar-with-dependency-plugin",
        applies: jar_with_dependencies_applies,
        classify: jar_with_dependencies,
    },
    ClassificationRule {
        name: "onejar",
        applies: |ctx| {
            ctx.plugin(ONEJAR_GROUP, ONEJAR_PLUGIN)
                .is_some_and(|p| p.has_goal("one-jar"))
        },
        classify: onejar,
    },
    ClassificationRule {
        name: "spring-boot-starters-without-plugin",
        applies: |ctx| ctx.model.has_spring_boot_starters(),
        classify: jar_starters_without_plugin,
    },
];

pub static WAR_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "spring-boot-war",
        applies: |ctx| ctx.plugin(SPRING_BOOT_GROUP, SPRING_BOOT_PLUGIN).is_some(),
        classify: spring_boot_war,
    },
    ClassificationRule {
        name: "jetty",
        applies: |ctx| ctx.plugin(JETTY_GROUP, JETTY_PLUGIN).is_some(),
        classify: |_| {
            ClassificationResult::new(ExecutableClassification::PluginRunnable {
                method: JETTY_PLUGIN.to_string(),
                embedded_server: "Jetty".to_string(),
                run_command: "mvn jetty:run".to_string(),
            })
        },
    },
    ClassificationRule {
        name: "tomcat",
        applies: |ctx| {
            ctx.plugin(TOMCAT_GROUP, TOMCAT7_PLUGIN).is_some()
                || ctx.plugin(TOMCAT_GROUP, TOMCAT8_PLUGIN).is_some()
        },
        classify: |_| {
            ClassificationResult::new(ExecutableClassification::PluginRunnable {
                method: TOMCAT7_PLUGIN.to_string(),
                embedded_server: "Tomcat".to_string(),
                run_command: "mvn tomcat7:run".to_string(),
            })
        },
    },
    ClassificationRule {
        name: "spring-boot-starters-without-plugin",
        applies: |ctx| ctx.model.has_spring_boot_starters(),
        classify: |ctx| {
            ClassificationResult::deployable_only(ArchiveType::War, STARTERS_WITHOUT_PLUGIN)
                .with_spring_boot(true)
                .with_profiles(module_profiles(ctx.module_dir))
                .with_warning(WAR_STARTERS_WARNING)
        },
    },
];

pub static EAR_RULES: &[ClassificationRule] = &[ClassificationRule {
    name: "ear-plugin",
    applies: |ctx| ctx.maven_plugin(EAR_PLUGIN).is_some(),
    classify: enterprise_archive,
}];

fn configuration(plugin: Option<&Plugin>) -> Option<&ConfigNode> {
    plugin.and_then(|p| p.configuration.as_ref())
}

fn spring_boot_jar(ctx: &RuleContext<'_>) -> ClassificationResult {
    let plugin = ctx.plugin(SPRING_BOOT_GROUP, SPRING_BOOT_PLUGIN);

    ClassificationResult::new(ExecutableClassification::ExecutableJar {
        method: SPRING_BOOT_PLUGIN.to_string(),
        structure: JarStructure::JarInJar,
        main_class: spring_boot_main_class(plugin),
        launcher_class: Some(JAR_LAUNCHER.to_string()),
        run_command: ctx.run_jar(".jar"),
        transformers: Vec::new(),
        descriptors: Vec::new(),
        obsolete: false,
    })
    .with_spring_boot(true)
    .with_profiles(module_profiles(ctx.module_dir))
}

fn spring_boot_war(ctx: &RuleContext<'_>) -> ClassificationResult {
    let plugin = ctx.plugin(SPRING_BOOT_GROUP, SPRING_BOOT_PLUGIN);

    ClassificationResult::new(ExecutableClassification::ExecutableWar {
        method: SPRING_BOOT_PLUGIN.to_string(),
        main_class: spring_boot_main_class(plugin),
        launcher_class: WAR_LAUNCHER.to_string(),
        embedded_server: SPRING_BOOT_EMBEDDED_SERVERS.to_string(),
        run_command: ctx.run_jar(".war"),
    })
    .with_spring_boot(true)
    .with_profiles(module_profiles(ctx.module_dir))
}

fn spring_boot_main_class(plugin: Option<&Plugin>) -> Option<String> {
    plugin.and_then(|p| p.config_text("mainClass").or_else(|| p.config_text("start-class")))
}

fn shade_jar(ctx: &RuleContext<'_>) -> ClassificationResult {
    let config = configuration(ctx.maven_plugin(SHADE_PLUGIN));
    let transformers = config
        .map(|c| c.nodes_at("transformers/transformer"))
        .unwrap_or_default();

    let main_class = transformers.iter().find_map(|transformer| {
        transformer
            .attribute("implementation")
            .filter(|implementation| implementation.contains("ManifestResourceTransformer"))
            .and_then(|_| transformer.text_at("mainClass"))
    });

    let names = transformers
        .iter()
        .filter_map(|transformer| transformer.attribute("implementation"))
        .map(|implementation| {
            implementation
                .rsplit('.')
                .next()
                .unwrap_or(implementation)
                .to_string()
        })
        .collect();

    ClassificationResult::new(ExecutableClassification::ExecutableJar {
        method: SHADE_PLUGIN.to_string(),
        structure: JarStructure::FlatJar,
        main_class,
        launcher_class: None,
        run_command: ctx.run_jar(".jar"),
        transformers: names,
        descriptors: Vec::new(),
        obsolete: false,
    })
    .with_spring_boot(ctx.model.has_spring_boot_starters())
}

fn assembly_jar(ctx: &RuleContext<'_>) -> ClassificationResult {
    let config = configuration(ctx.maven_plugin(ASSEMBLY_PLUGIN));
    let descriptors = config
        .map(|c| {
            let mut descriptors = c.texts_at("descriptorRefs/descriptorRef");
            descriptors.extend(c.texts_at("descriptors/descriptor"));
            descriptors
        })
        .unwrap_or_default();

    ClassificationResult::new(ExecutableClassification::ExecutableJar {
        method: ASSEMBLY_PLUGIN.to_string(),
        structure: JarStructure::FlatJar,
        main_class: config.and_then(|c| c.text_at("archive/manifest/mainClass")),
        launcher_class: None,
        run_command: ctx.run_jar("-jar-with-dependencies.jar"),
        transformers: Vec::new(),
        descriptors,
        obsolete: false,
    })
    .with_spring_boot(ctx.model.has_spring_boot_starters())
}

fn jar_with_dependencies_applies(ctx: &RuleContext<'_>) -> bool {
    let (Some(dependency), Some(jar)) = (
        ctx.maven_plugin(DEPENDENCY_PLUGIN),
        ctx.maven_plugin(JAR_PLUGIN),
    ) else {
        return false;
    };

    dependency.has_goal("unpack-dependencies")
        || dependency.has_goal("copy-dependencies")
        || jar.config_text("classesDirectory").is_some()
}

fn jar_with_dependencies(ctx: &RuleContext<'_>) -> ClassificationResult {
    let main_class = ctx
        .maven_plugin(JAR_PLUGIN)
        .and_then(|jar| jar.config_text("archive/manifest/mainClass"));

    ClassificationResult::new(ExecutableClassification::ExecutableJar {
        method: JAR_WITH_DEPENDENCY_PLUGIN.to_string(),
        structure: JarStructure::FlatJar,
        main_class,
        launcher_class: None,
        run_command: ctx.run_jar(".jar"),
        transformers: Vec::new(),
        descriptors: Vec::new(),
        obsolete: false,
    })
    .with_spring_boot(ctx.model.has_spring_boot_starters())
}

fn onejar(ctx: &RuleContext<'_>) -> ClassificationResult {
    ClassificationResult::new(ExecutableClassification::ExecutableJar {
        method: ONEJAR_PLUGIN.to_string(),
        structure: JarStructure::JarInJar,
        main_class: None,
        launcher_class: None,
        run_command: ctx.run_jar(".one-jar.jar"),
        transformers: Vec::new(),
        descriptors: Vec::new(),
        obsolete: true,
    })
    .with_warning(ONEJAR_WARNING)
}

fn jar_starters_without_plugin(ctx: &RuleContext<'_>) -> ClassificationResult {
    ClassificationResult::new(ExecutableClassification::RequiresPlugin {
        kind: ArchiveType::Jar,
        method: STARTERS_WITHOUT_PLUGIN.to_string(),
        run_command: "Requires plugin configuration to be executable".to_string(),
    })
    .with_spring_boot(true)
    .with_profiles(module_profiles(ctx.module_dir))
    .with_warning(JAR_STARTERS_WARNING)
}

fn enterprise_archive(ctx: &RuleContext<'_>) -> ClassificationResult {
    let config = configuration(ctx.maven_plugin(EAR_PLUGIN));

    let modules = config
        .map(|c| {
            [("webModule", ".war"), ("ejbModule", ".jar"), ("jarModule", ".jar")]
                .into_iter()
                .flat_map(|(kind, extension)| {
                    c.nodes_at(&format!("modules/{kind}"))
                        .into_iter()
                        .filter_map(|module| module.text_at("artifactId"))
                        .map(move |artifact| format!("{artifact}{extension}"))
                })
                .collect()
        })
        .unwrap_or_default();

    ClassificationResult::new(ExecutableClassification::EnterpriseArchive {
        method: EAR_PLUGIN.to_string(),
        modules,
        spec_version: config.and_then(|c| c.text_at("version")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate_of(pom: &PomModel) -> Coordinate {
        pom.resolve_coordinate().unwrap()
    }

    fn pom(body: &str) -> PomModel {
        PomModel::parse_str(
            &format!(
                "<project><groupId>com.acme</groupId><artifactId>app</artifactId><version>1.0</version>{body}</project>"
            ),
            Path::new("app/pom.xml"),
        )
        .unwrap()
    }

    fn first_match(rules: &[ClassificationRule], model: &PomModel) -> Option<&'static str> {
        let coordinate = coordinate_of(model);
        let ctx = RuleContext::new(model, &coordinate, Path::new("/nonexistent"));
        rules.iter().find(|rule| (rule.applies)(&ctx)).map(|rule| rule.name)
    }

    #[test]
    fn test_shade_rule_extracts_main_class_and_transformers() {
        let model = pom(
            r#"<build><plugins><plugin>
                 <artifactId>maven-shade-plugin</artifactId>
                 <configuration><transformers>
                   <transformer implementation="org.apache.maven.plugins.shade.resource.ServicesResourceTransformer"/>
                   <transformer implementation="org.apache.maven.plugins.shade.resource.ManifestResourceTransformer">
                     <mainClass>com.acme.Main</mainClass>
                   </transformer>
                 </transformers></configuration>
               </plugin></plugins></build>"#,
        );
        let coordinate = coordinate_of(&model);
        let ctx = RuleContext::new(&model, &coordinate, Path::new("/nonexistent"));

        let info = shade_jar(&ctx).to_info();

        assert_eq!(info.main_class.as_deref(), Some("com.acme.Main"));
        assert_eq!(
            info.transformers,
            vec!["ServicesResourceTransformer", "ManifestResourceTransformer"]
        );
        assert_eq!(info.run_command.as_deref(), Some("java -jar target/app-1.0.jar"));
    }

    #[test]
    fn test_spring_boot_without_repackage_goal_is_skipped() {
        let model = pom(
            "<build><plugins><plugin>\
               <groupId>org.springframework.boot</groupId><artifactId>spring-boot-maven-plugin</artifactId>\
               <executions><execution><goals><goal>build-image</goal></goals></execution></executions>\
             </plugin></plugins></build>",
        );

        assert_eq!(first_match(JAR_RULES, &model), None);
        assert_eq!(first_match(WAR_RULES, &model), Some("spring-boot-war"));
    }

    #[test]
    fn test_jar_plugin_needs_dependency_plugin() {
        let only_jar = pom(
            "<build><plugins><plugin><artifactId>maven-jar-plugin</artifactId>\
             <configuration><classesDirectory>out</classesDirectory></configuration></plugin></plugins></build>",
        );
        let both = pom(
            "<build><plugins>\
               <plugin><artifactId>maven-jar-plugin</artifactId></plugin>\
               <plugin><artifactId>maven-dependency-plugin</artifactId><executions><execution>\
                 <goals><goal>copy-dependencies</goal></goals></execution></executions></plugin>\
             </plugins></build>",
        );

        assert_eq!(first_match(JAR_RULES, &only_jar), None);
        assert_eq!(first_match(JAR_RULES, &both), Some("jar-with-dependency-plugin"));
    }

    #[test]
    fn test_ear_modules() {
        let model = pom(
            "<build><plugins><plugin><artifactId>maven-ear-plugin</artifactId><configuration>\
               <version>8</version>\
               <modules>\
                 <webModule><artifactId>shop-web</artifactId></webModule>\
                 <ejbModule><artifactId>shop-ejb</artifactId></ejbModule>\
                 <jarModule><artifactId>shop-lib</artifactId></jarModule>\
                 <jarModule><artifactId>shop-util</artifactId></jarModule>\
               </modules>\
             </configuration></plugin></plugins></build>",
        );
        let coordinate = coordinate_of(&model);
        let ctx = RuleContext::new(&model, &coordinate, Path::new("/nonexistent"));

        let info = enterprise_archive(&ctx).to_info();

        assert_eq!(
            info.modules,
            vec!["shop-web.war", "shop-ejb.jar", "shop-lib.jar", "shop-util.jar"]
        );
        assert_eq!(info.java_ee_version.as_deref(), Some("8"));
        assert!(info.deployment_only);
    }
}
