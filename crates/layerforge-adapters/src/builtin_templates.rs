//! Bundled template bodies.
//!
//! One Dart/Flutter body per [`TemplateKind`]. Bodies are plain text with
//! `{{VARIABLE}}` placeholders (see `RenderContext`); the state and cubit
//! kinds ship two variants selected by `RenderOptions::equatable`.
//!
//! Users can replace any body with a `<kind-id>.tmpl` file in the override
//! directory; see [`crate::renderer::DirectoryRenderer`].

use layerforge_core::domain::TemplateKind;

/// The bundled body for `kind`.
pub fn body(kind: TemplateKind, equatable: bool) -> &'static str {
    match kind {
        TemplateKind::Repository => REPOSITORY,
        TemplateKind::UseCase => USECASE,
        TemplateKind::InputPort => INPUT_PORT,
        TemplateKind::OutputPort => OUTPUT_PORT,
        TemplateKind::Module => MODULE,
        TemplateKind::Route => ROUTE,
        TemplateKind::Direction => DIRECTION,
        TemplateKind::PresenterFactory => PRESENTER_FACTORY,
        TemplateKind::State if equatable => STATE_EQUATABLE,
        TemplateKind::State => STATE,
        TemplateKind::Cubit if equatable => CUBIT_EQUATABLE,
        TemplateKind::Cubit => CUBIT,
        TemplateKind::Presenter => PRESENTER,
        TemplateKind::Screen => SCREEN,
    }
}

// ── infra ────────────────────────────────────────────────────────────────────

const REPOSITORY: &str = r#"import '../../ports/output_ports/{{NAME_SNAKE}}_output_port.dart';

class {{NAME_PASCAL}}Repository implements {{NAME_PASCAL}}OutputPort {
  const {{NAME_PASCAL}}Repository();
}
"#;

// ── usecases / ports ─────────────────────────────────────────────────────────

const USECASE: &str = r#"import '../ports/input_ports/{{NAME_SNAKE}}_input_port.dart';
import '../ports/output_ports/{{NAME_SNAKE}}_output_port.dart';

class {{NAME_PASCAL}}UseCase implements {{NAME_PASCAL}}InputPort {
  final {{NAME_PASCAL}}OutputPort _outputPort;

  const {{NAME_PASCAL}}UseCase(this._outputPort);
}
"#;

const INPUT_PORT: &str = r#"abstract class {{NAME_PASCAL}}InputPort {}
"#;

const OUTPUT_PORT: &str = r#"abstract class {{NAME_PASCAL}}OutputPort {}
"#;

// ── locator ──────────────────────────────────────────────────────────────────

const MODULE: &str = r#"import 'package:get_it/get_it.dart';

import '../infra/repositories/{{NAME_SNAKE}}_repository.dart';
import '../ports/input_ports/{{NAME_SNAKE}}_input_port.dart';
import '../ports/output_ports/{{NAME_SNAKE}}_output_port.dart';
import '../presentation/factories/{{NAME_SNAKE}}_presenter_factory.dart';
import '../usecases/{{NAME_SNAKE}}_usecase.dart';

class {{NAME_PASCAL}}Module {
  static void register(GetIt locator) {
    locator
      ..registerFactory<{{NAME_PASCAL}}OutputPort>(
        () => const {{NAME_PASCAL}}Repository(),
      )
      ..registerFactory<{{NAME_PASCAL}}InputPort>(
        () => {{NAME_PASCAL}}UseCase(locator()),
      )
      ..registerFactory<{{NAME_PASCAL}}PresenterFactory>(
        () => {{NAME_PASCAL}}PresenterFactory(locator()),
      );
  }
}
"#;

// ── navigation ───────────────────────────────────────────────────────────────

const ROUTE: &str = r#"import 'package:flutter/material.dart';

import '../../ui/screens/{{NAME_SNAKE}}_screen.dart';

class {{NAME_PASCAL}}Route {
  static const String name = '/{{NAME_LOWER}}';

  static Route<dynamic> build(RouteSettings settings) {
    return MaterialPageRoute(
      settings: settings,
      builder: (_) => const {{NAME_PASCAL}}Screen(),
    );
  }
}
"#;

const DIRECTION: &str = r#"import 'package:flutter/material.dart';

import '../routes/{{NAME_SNAKE}}_route.dart';

class {{NAME_PASCAL}}Direction {
  const {{NAME_PASCAL}}Direction();

  Future<T?> go<T>(BuildContext context) {
    return Navigator.of(context).pushNamed<T>({{NAME_PASCAL}}Route.name);
  }
}
"#;

// ── presentation ─────────────────────────────────────────────────────────────

const PRESENTER_FACTORY: &str = r#"import '../../ports/input_ports/{{NAME_SNAKE}}_input_port.dart';
import '../states/{{NAME_SNAKE}}_cubit.dart';

class {{NAME_PASCAL}}PresenterFactory {
  final {{NAME_PASCAL}}InputPort _inputPort;

  const {{NAME_PASCAL}}PresenterFactory(this._inputPort);

  {{NAME_PASCAL}}Cubit create() => {{NAME_PASCAL}}Cubit(_inputPort);
}
"#;

const STATE: &str = r#"part of '{{NAME_SNAKE}}_cubit.dart';

abstract class {{NAME_PASCAL}}State {
  const {{NAME_PASCAL}}State();
}

class {{NAME_PASCAL}}Initial extends {{NAME_PASCAL}}State {
  const {{NAME_PASCAL}}Initial();
}
"#;

const STATE_EQUATABLE: &str = r#"part of '{{NAME_SNAKE}}_cubit.dart';

abstract class {{NAME_PASCAL}}State extends Equatable {
  const {{NAME_PASCAL}}State();

  @override
  List<Object?> get props => [];
}

class {{NAME_PASCAL}}Initial extends {{NAME_PASCAL}}State {
  const {{NAME_PASCAL}}Initial();
}
"#;

const CUBIT: &str = r#"import 'package:flutter_bloc/flutter_bloc.dart';

import '../../ports/input_ports/{{NAME_SNAKE}}_input_port.dart';

part '{{NAME_SNAKE}}_state.dart';

class {{NAME_PASCAL}}Cubit extends Cubit<{{NAME_PASCAL}}State> {
  final {{NAME_PASCAL}}InputPort _inputPort;

  {{NAME_PASCAL}}Cubit(this._inputPort) : super(const {{NAME_PASCAL}}Initial());
}
"#;

const CUBIT_EQUATABLE: &str = r#"import 'package:equatable/equatable.dart';
import 'package:flutter_bloc/flutter_bloc.dart';

import '../../ports/input_ports/{{NAME_SNAKE}}_input_port.dart';

part '{{NAME_SNAKE}}_state.dart';

class {{NAME_PASCAL}}Cubit extends Cubit<{{NAME_PASCAL}}State> {
  final {{NAME_PASCAL}}InputPort _inputPort;

  {{NAME_PASCAL}}Cubit(this._inputPort) : super(const {{NAME_PASCAL}}Initial());
}
"#;

// ── ui ───────────────────────────────────────────────────────────────────────

const PRESENTER: &str = r#"import 'package:flutter/material.dart';
import 'package:flutter_bloc/flutter_bloc.dart';

import '../../presentation/states/{{NAME_SNAKE}}_cubit.dart';

class {{NAME_PASCAL}}Presenter extends StatelessWidget {
  final Widget Function(BuildContext, {{NAME_PASCAL}}State) builder;

  const {{NAME_PASCAL}}Presenter({super.key, required this.builder});

  @override
  Widget build(BuildContext context) {
    return BlocBuilder<{{NAME_PASCAL}}Cubit, {{NAME_PASCAL}}State>(
      builder: builder,
    );
  }
}
"#;

const SCREEN: &str = r#"import 'package:flutter/material.dart';

class {{NAME_PASCAL}}Screen extends StatelessWidget {
  const {{NAME_PASCAL}}Screen({super.key});

  @override
  Widget build(BuildContext context) {
    return Scaffold(
      appBar: AppBar(title: const Text('{{NAME_TITLE}}')),
      body: const SizedBox.shrink(),
    );
  }
}
"#;
